//! S4 — unresolvable navigation (spec.md §8): a `routerLink` whose
//! target doesn't match any known route still produces an edge, with a
//! null `to`/`targetRouteId` and the raw text preserved as `targetText`.

mod support;

use ng_graph_core::logging::NullLogger;
use ng_graph_core::model::EdgeKind;
use support::FixtureProject;

fn build_fixture() -> FixtureProject {
    let project = FixtureProject::new("s4");

    project.write(
        "home.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-home',
  template: '<a routerLink="/nonexistent">Nowhere</a>',
})
export class HomeComponent {}
"#,
    );

    project.write(
        "app-routing.module.ts",
        r#"
import { NgModule } from '@angular/core';
import { RouterModule, Routes } from '@angular/router';
import { HomeComponent } from './home.component';

const routes: Routes = [
  { path: 'home', component: HomeComponent },
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
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [HomeComponent],
  imports: [AppRoutingModule],
  bootstrap: [HomeComponent],
})
export class AppModule {}
"#,
    );

    project
}

#[test]
fn unresolvable_navigation_target_keeps_raw_text_with_null_to() {
    let project = build_fixture();
    let logger = NullLogger;
    let output = ng_graph_core::run(project.root(), &project.tsconfig_path(), &logger)
        .expect("pipeline run should succeed for a well-formed fixture");

    let nav_edges: Vec<_> = output
        .graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::WidgetNavigatesRoute)
        .collect();
    assert_eq!(nav_edges.len(), 1);

    let edge = nav_edges[0];
    assert!(edge.to.is_none());
    assert!(edge.target_route_id.is_none());
    assert_eq!(edge.target_text.as_deref(), Some("/nonexistent"));
    assert!(!edge.refs.is_empty());
}
