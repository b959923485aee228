//! Universal invariants (spec.md §8) checked over a small fixed corpus
//! of synthetic projects, rather than the single literal scenarios
//! covered by the `sN_*` integration tests.

mod support;

use std::collections::BTreeSet;

use ng_graph_core::logging::NullLogger;
use ng_graph_core::model::{extract_route_params, Multigraph};
use ng_graph_core::PipelineOutput;
use support::FixtureProject;

fn three_route_app() -> FixtureProject {
    let project = FixtureProject::new("props_three_route");

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

fn nested_param_app() -> FixtureProject {
    let project = FixtureProject::new("props_nested_param");

    project.write(
        "org-detail.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-org-detail',
  template: '<a routerLink="/orgs/{{org.id}}/members/{{member.id}}">Member</a>',
})
export class OrgDetailComponent {}
"#,
    );

    project.write(
        "org-member.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-org-member',
  template: '<span>member</span>',
})
export class OrgMemberComponent {}
"#,
    );

    project.write(
        "app-routing.module.ts",
        r#"
import { NgModule } from '@angular/core';
import { RouterModule, Routes } from '@angular/router';
import { OrgDetailComponent } from './org-detail.component';
import { OrgMemberComponent } from './org-member.component';

const routes: Routes = [
  { path: 'orgs/:orgId', component: OrgDetailComponent },
  { path: 'orgs/:orgId/members/:memberId', component: OrgMemberComponent },
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
import { OrgDetailComponent } from './org-detail.component';
import { OrgMemberComponent } from './org-member.component';
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [OrgDetailComponent, OrgMemberComponent],
  imports: [AppRoutingModule],
  bootstrap: [OrgDetailComponent],
})
export class AppModule {}
"#,
    );

    project
}

fn run_fixture(project: &FixtureProject) -> PipelineOutput {
    let logger = NullLogger;
    ng_graph_core::run(project.root(), &project.tsconfig_path(), &logger)
        .expect("pipeline run should succeed for a well-formed fixture")
}

/// Invariants 1-5: edge endpoints resolve, `to`/`targetRouteId`
/// nullability agree, nodes/edges are sorted, ids are unique, and
/// `Stats` is consistent with the edge-kind partition.
fn assert_structural_invariants(graph: &Multigraph) {
    let node_ids: BTreeSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids.len(), graph.nodes.len(), "node ids must be unique");

    let mut edge_ids: BTreeSet<&str> = BTreeSet::new();
    for edge in &graph.edges {
        assert!(node_ids.contains(edge.from.as_str()), "edge.from {} must reference an existing node", edge.from);
        if let Some(to) = &edge.to {
            assert!(node_ids.contains(to.as_str()), "edge.to {to} must reference an existing node");
        }
        assert_eq!(
            edge.to.is_none(),
            edge.target_route_id.is_none(),
            "edge.to == null iff edge.targetRouteId == null (edge {})",
            edge.id
        );
        assert!(edge_ids.insert(edge.id.as_str()), "duplicate edge id {}", edge.id);
    }

    let mut sorted_nodes = graph.nodes.clone();
    sorted_nodes.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(
        graph.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>(),
        sorted_nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>(),
        "nodes must be strictly increasing by id"
    );

    let mut sorted_edges = graph.edges.clone();
    sorted_edges.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    assert_eq!(
        graph.edges.iter().map(|e| e.id.clone()).collect::<Vec<_>>(),
        sorted_edges.iter().map(|e| e.id.clone()).collect::<Vec<_>>(),
        "edges must be non-decreasing by (from, kind, to, id)"
    );

    let structural_count = graph.edges.iter().filter(|e| e.kind.is_structural()).count();
    let executable_count = graph.edges.len() - structural_count;
    assert_eq!(structural_count + executable_count, graph.edges.len());
}

#[test]
fn three_route_app_satisfies_structural_invariants() {
    let project = three_route_app();
    let output = run_fixture(&project);
    assert_structural_invariants(&output.graph);

    let stats = &output.stats;
    assert_eq!(stats.node_count, output.graph.nodes.len());
    assert_eq!(stats.edge_count, output.graph.edges.len());
    assert_eq!(stats.structural_edge_count + stats.executable_edge_count, stats.edge_count);
}

#[test]
fn nested_param_app_satisfies_structural_invariants() {
    let project = nested_param_app();
    let output = run_fixture(&project);
    assert_structural_invariants(&output.graph);
}

/// Invariant 8: every resolved `WIDGET_NAVIGATES_ROUTE` edge's target
/// route fullPath is consistent with the navigation index used to
/// resolve it (here, an exact match once interpolation markers are
/// stripped to their static segments).
#[test]
fn resolved_navigation_edges_target_a_real_route_with_matching_shape() {
    let project = nested_param_app();
    let output = run_fixture(&project);

    let nav_edges: Vec<_> = output
        .graph
        .edges
        .iter()
        .filter(|e| e.kind == ng_graph_core::model::EdgeKind::WidgetNavigatesRoute)
        .collect();
    assert_eq!(nav_edges.len(), 1);

    let edge = &nav_edges[0];
    let to = edge.to.as_deref().expect("navigation should resolve");
    let target = output
        .routes
        .routes
        .values()
        .find(|r| r.id() == to)
        .expect("resolved target must exist in the route map");
    assert_eq!(target.full_path(), "/orgs/:orgId/members/:memberId");
}

/// Invariant 9: `extractRouteParams(fullPath)` matches each route's
/// stored, sorted, deduplicated `params.routeParams`.
#[test]
fn route_params_match_extraction_and_are_sorted_and_unique() {
    let project = nested_param_app();
    let output = run_fixture(&project);

    for route in output.routes.routes.values() {
        let expected = extract_route_params(route.full_path());
        assert_eq!(route.common().params.route_params, expected);

        let mut sorted = expected.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(expected, sorted, "routeParams must already be sorted and deduplicated");
    }
}

/// Invariant 10: external node ids are a deterministic, injective-in-
/// practice function of the navigation target text.
#[test]
fn external_node_ids_are_idempotent_and_differ_across_distinct_urls() {
    let project = three_route_app();
    let output_a = run_fixture(&project);
    let output_b = run_fixture(&project);

    let external_a: Vec<&str> = output_a
        .graph
        .nodes
        .iter()
        .filter(|n| n.kind == ng_graph_core::model::NodeKind::External)
        .map(|n| n.id.as_str())
        .collect();
    let external_b: Vec<&str> = output_b
        .graph
        .nodes
        .iter()
        .filter(|n| n.kind == ng_graph_core::model::NodeKind::External)
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(external_a, external_b, "external node id derivation must be deterministic");
}
