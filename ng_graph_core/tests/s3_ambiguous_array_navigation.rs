//! S3 — ambiguous array navigation tie-break (spec.md §8): when an
//! array-literal `routerLink` could match more than one route shape, the
//! route with fewer path parameters wins.

mod support;

use ng_graph_core::logging::NullLogger;
use ng_graph_core::model::EdgeKind;
use support::FixtureProject;

fn build_fixture() -> FixtureProject {
    let project = FixtureProject::new("s3");

    project.write(
        "owner-list.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-owner-list',
  template: `<a routerLink="['/owners/add']">Add owner</a>`,
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
        "owner-add.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-owner-add',
  template: '<span>add</span>',
})
export class OwnerAddComponent {}
"#,
    );

    project.write(
        "app-routing.module.ts",
        r#"
import { NgModule } from '@angular/core';
import { RouterModule, Routes } from '@angular/router';
import { OwnerListComponent } from './owner-list.component';
import { OwnerDetailComponent } from './owner-detail.component';
import { OwnerAddComponent } from './owner-add.component';

const routes: Routes = [
  { path: 'owners', component: OwnerListComponent },
  { path: 'owners/:id', component: OwnerDetailComponent },
  { path: 'owners/add', component: OwnerAddComponent },
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
import { OwnerAddComponent } from './owner-add.component';
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [OwnerListComponent, OwnerDetailComponent, OwnerAddComponent],
  imports: [AppRoutingModule],
  bootstrap: [OwnerListComponent],
})
export class AppModule {}
"#,
    );

    project
}

#[test]
fn array_navigation_prefers_the_route_with_fewer_params() {
    let project = build_fixture();
    let logger = NullLogger;
    let output = ng_graph_core::run(project.root(), &project.tsconfig_path(), &logger)
        .expect("pipeline run should succeed for a well-formed fixture");

    let add_route = output
        .routes
        .routes
        .values()
        .find(|r| r.full_path() == "/owners/add")
        .expect("/owners/add route should exist");

    let nav_edges: Vec<_> = output
        .graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::WidgetNavigatesRoute)
        .collect();
    assert_eq!(nav_edges.len(), 1);
    assert_eq!(nav_edges[0].to.as_deref(), Some(add_route.id()));
}
