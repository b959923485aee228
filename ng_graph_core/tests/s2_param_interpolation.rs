//! S2 — param interpolation (spec.md §8): a `routerLink` built from a
//! string-interpolated path segment resolves to the parameterized route.

mod support;

use ng_graph_core::logging::NullLogger;
use ng_graph_core::model::EdgeKind;
use support::FixtureProject;

fn build_fixture() -> FixtureProject {
    let project = FixtureProject::new("s2");

    project.write(
        "owner-list.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-owner-list',
  template: '<a routerLink="/owners/{{owner.id}}">Open</a>',
})
export class OwnerListComponent {}
"#,
    );

    project.write(
        "owner-detail.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-owner-detail',
  template: '<span>detail</span>',
})
export class OwnerDetailComponent {}
"#,
    );

    project.write(
        "app-routing.module.ts",
        r#"
import { NgModule } from '@angular/core';
import { RouterModule, Routes } from '@angular/router';
import { OwnerListComponent } from './owner-list.component';
import { OwnerDetailComponent } from './owner-detail.component';

const routes: Routes = [
  { path: 'owners', component: OwnerListComponent },
  { path: 'owners/:id', component: OwnerDetailComponent },
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
import { OwnerListComponent } from './owner-list.component';
import { OwnerDetailComponent } from './owner-detail.component';
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [OwnerListComponent, OwnerDetailComponent],
  imports: [AppRoutingModule],
  bootstrap: [OwnerListComponent],
})
export class AppModule {}
"#,
    );

    project
}

#[test]
fn interpolated_router_link_resolves_to_parameterized_route() {
    let project = build_fixture();
    let logger = NullLogger;
    let output = ng_graph_core::run(project.root(), &project.tsconfig_path(), &logger)
        .expect("pipeline run should succeed for a well-formed fixture");

    let detail_route = output
        .routes
        .routes
        .values()
        .find(|r| r.full_path() == "/owners/:id")
        .expect("/owners/:id route should exist");

    let nav_edges: Vec<_> = output
        .graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::WidgetNavigatesRoute)
        .collect();
    assert_eq!(nav_edges.len(), 1, "expected exactly one WIDGET_NAVIGATES_ROUTE edge");

    let edge = nav_edges[0];
    assert_eq!(edge.to.as_deref(), Some(detail_route.id()));
    assert_eq!(edge.target_route_id.as_deref(), Some(detail_route.id()));
}
