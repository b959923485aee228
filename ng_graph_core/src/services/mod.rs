//! Service discovery: every `@Injectable`-decorated class (spec.md §3
//! "Service"), referenced by the Graph Builder for
//! `MODULE_PROVIDES_SERVICE`/`COMPONENT_PROVIDES_SERVICE`/
//! `COMPONENT_CALLS_SERVICE` edges (§4.8).

use std::collections::BTreeMap;

use oxc_ast::ast as oxc;
use oxc_span::GetSpan;

use crate::ast::{access, Project, SourceFile};
use crate::model::{Origin, Service};

pub fn extract_services(project: &Project) -> BTreeMap<String, Service> {
    let mut services = BTreeMap::new();
    for file in project.files() {
        for stmt in &file.program().body {
            if let Some(class) = class_decl(stmt) {
                if let Some(decorator) = access::find_decorator(class, "Injectable") {
                    if let Some(service) = build_service(file, class, decorator) {
                        services.insert(service.id.clone(), service);
                    }
                }
            }
        }
    }
    services
}

fn class_decl<'a>(stmt: &'a oxc::Statement<'a>) -> Option<&'a oxc::Class<'a>> {
    match stmt {
        oxc::Statement::ClassDeclaration(c) => Some(c),
        oxc::Statement::ExportNamedDeclaration(e) => match &e.declaration {
            Some(oxc::Declaration::ClassDeclaration(c)) => Some(c),
            _ => None,
        },
        _ => None,
    }
}

fn build_service(file: &SourceFile, class: &oxc::Class, decorator: &oxc::Decorator) -> Option<Service> {
    let name = class.id.as_ref()?.name.to_string();
    let file_path = file.path.to_string_lossy().to_string();
    let id = format!("{}#{}", file_path, name);
    let span = class.span();
    let origin = Origin::new(&file_path, span.start, span.end, &file.text);

    let provided_in = access::decorator_options(decorator)
        .and_then(|o| access::object_property(o, "providedIn"))
        .and_then(access::get_string_literal_value);

    Some(Service {
        id,
        name,
        file: file_path,
        origin,
        provided_in,
    })
}
