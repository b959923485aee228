//! S7 — graph input invariance (spec.md §8): building the multigraph
//! must not mutate the route map it reads from.

mod support;

use ng_graph_core::ast::Project;
use ng_graph_core::graph::{self, GraphInputs};
use ng_graph_core::logging::NullLogger;
use ng_graph_core::{components, events, guards, modules, routes, services};
use support::FixtureProject;

fn build_fixture() -> FixtureProject {
    let project = FixtureProject::new("s7");

    project.write(
        "home.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-home',
  template: '<a routerLink="/about">About</a>',
})
export class HomeComponent {}
"#,
    );

    project.write(
        "about.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-about',
  template: '<a routerLink="/home">Home</a>',
})
export class AboutComponent {}
"#,
    );

    project.write(
        "app-routing.module.ts",
        r#"
import { NgModule } from '@angular/core';
import { RouterModule, Routes } from '@angular/router';
import { HomeComponent } from './home.component';
import { AboutComponent } from './about.component';

const routes: Routes = [
  { path: 'home', component: HomeComponent },
  { path: 'about', component: AboutComponent },
];

@NgModule({
  imports: [RouterModule.forRoot(routes)],
  exports: [RouterModule],
})
export class AppRoutingModule {}
"#,
    );

    project.write(
        "app.module.ts",
        r#"
import { NgModule } from '@angular/core';
import { HomeComponent } from './home.component';
import { AboutComponent } from './about.component';
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [HomeComponent, AboutComponent],
  imports: [AppRoutingModule],
  bootstrap: [HomeComponent],
})
export class AppModule {}
"#,
    );

    project
}

#[test]
fn building_the_graph_does_not_mutate_the_route_map() {
    let project = build_fixture();
    let logger = NullLogger;

    let loaded = Project::load(project.root(), &project.tsconfig_path()).expect("project should load");

    let mut module_map = modules::extract_modules(&loaded);
    let extraction = components::extract_components(&loaded, &logger);
    let component_list: Vec<_> = extraction.components.values().cloned().collect();
    let (route_map, _component_routes) = routes::extract_routes(&loaded, &component_list, &logger);
    modules::finalize_roles(&loaded, &mut module_map, &route_map);

    let before: Vec<(String, String)> = route_map
        .routes
        .values()
        .map(|r| (r.id().to_string(), r.full_path().to_string()))
        .collect();

    let widget_events = events::analyze_events(&loaded, &extraction.components, &extraction.widgets);
    let service_map = services::extract_services(&loaded);
    let guard_summaries = guards::summarize_guards(&loaded, &route_map);

    let inputs = GraphInputs {
        project: &loaded,
        modules: &module_map,
        routes: &route_map,
        components: &extraction.components,
        widgets: &extraction.widgets,
        widget_composition: &extraction.widget_composition,
        services: &service_map,
        widget_events: &widget_events,
        guard_summaries: &guard_summaries,
    };
    let _graph = graph::build_graph(&inputs);

    let after: Vec<(String, String)> = route_map
        .routes
        .values()
        .map(|r| (r.id().to_string(), r.full_path().to_string()))
        .collect();

    assert_eq!(before, after, "building the graph must not mutate route ids/fullPaths");
}
