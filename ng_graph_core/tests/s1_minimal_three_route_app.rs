//! S1 — minimal three-route app (spec.md §8): a redirect route plus two
//! component routes, one internal and one external navigation link.

mod support;

use ng_graph_core::logging::NullLogger;
use ng_graph_core::model::{EdgeKind, NodeKind};
use support::FixtureProject;

fn build_fixture() -> FixtureProject {
    let project = FixtureProject::new("s1");

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
  template: '<a routerLink="/home">Home</a><a href="https://angular.io">Angular</a>',
})
export class AboutComponent {}
"#,
    );

    project.write(
        "header.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-header',
  template: '<span>header</span>',
})
export class HeaderComponent {}
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
  { path: '', redirectTo: '/home', pathMatch: 'full' },
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
import { BrowserModule } from '@angular/platform-browser';
import { HomeComponent } from './home.component';
import { AboutComponent } from './about.component';
import { HeaderComponent } from './header.component';
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [HomeComponent, AboutComponent, HeaderComponent],
  imports: [BrowserModule, AppRoutingModule],
  providers: [],
  bootstrap: [HomeComponent],
})
export class AppModule {}
"#,
    );

    project
}

#[test]
fn minimal_three_route_app_produces_expected_graph_shape() {
    let project = build_fixture();
    let logger = NullLogger;
    let output = ng_graph_core::run(project.root(), &project.tsconfig_path(), &logger)
        .expect("pipeline run should succeed for a well-formed fixture");

    let graph = &output.graph;

    let route_nodes: Vec<_> = graph.nodes.iter().filter(|n| n.kind == NodeKind::Route).collect();
    assert_eq!(route_nodes.len(), 3, "expected 3 Route nodes, got {route_nodes:?}");

    let component_nodes: Vec<_> = graph.nodes.iter().filter(|n| n.kind == NodeKind::Component).collect();
    assert_eq!(component_nodes.len(), 3, "expected 3 Component nodes, got {component_nodes:?}");

    let module_nodes = graph.nodes.iter().filter(|n| n.kind == NodeKind::Module).count();
    assert!(module_nodes >= 1, "expected at least 1 Module node");

    let external_nodes: Vec<_> = graph.nodes.iter().filter(|n| n.kind == NodeKind::External).collect();
    assert_eq!(external_nodes.len(), 1, "expected exactly 1 External node");
    let ext_id_re = regex_like_external_id(&external_nodes[0].id);
    assert!(ext_id_re, "external node id {} must match __ext__[0-9a-f]{{8}}", external_nodes[0].id);

    let redirect_edges: Vec<_> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::RouteRedirectsToRoute)
        .collect();
    assert_eq!(redirect_edges.len(), 1);
    assert_eq!(redirect_edges[0].is_system, Some(true));

    let home_route = route_by_full_path(&output, "/home");
    let about_route = route_by_full_path(&output, "/about");
    let root_route = route_by_full_path(&output, "/");

    assert_eq!(redirect_edges[0].from, root_route.id());
    assert_eq!(redirect_edges[0].to.as_deref(), Some(home_route.id()));

    let activates: Vec<_> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::RouteActivatesComponent)
        .collect();
    assert_eq!(activates.len(), 2);

    let navigates_route: Vec<_> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::WidgetNavigatesRoute)
        .collect();
    assert_eq!(navigates_route.len(), 2);
    for e in &navigates_route {
        assert!(e.to.is_some());
        assert!(e.target_route_id.is_some());
    }

    let navigates_external: Vec<_> = graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::WidgetNavigatesExternal)
        .collect();
    assert_eq!(navigates_external.len(), 1);

    let root_node = graph.nodes.iter().find(|n| n.id == root_route.id()).unwrap();
    assert_eq!(root_node.metadata["isEntry"], serde_json::json!(true));
    let home_node = graph.nodes.iter().find(|n| n.id == home_route.id()).unwrap();
    assert_eq!(home_node.metadata["isEntry"], serde_json::json!(true));
    let about_node = graph.nodes.iter().find(|n| n.id == about_route.id()).unwrap();
    assert_eq!(about_node.metadata["isEntry"], serde_json::json!(false));
}

fn route_by_full_path<'a>(output: &'a ng_graph_core::PipelineOutput, full_path: &str) -> &'a ng_graph_core::model::Route {
    output
        .routes
        .routes
        .values()
        .find(|r| r.full_path() == full_path)
        .unwrap_or_else(|| panic!("no route with fullPath {full_path}"))
}

fn regex_like_external_id(id: &str) -> bool {
    let Some(hex) = id.strip_prefix("__ext__") else {
        return false;
    };
    hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
}
