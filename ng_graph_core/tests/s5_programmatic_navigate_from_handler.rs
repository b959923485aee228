//! S5 — programmatic navigate from handler (spec.md §8): a click
//! handler's body calls `this.router.navigate([...])`, producing both a
//! handler-trigger edge and a resolved component-to-route navigation.

mod support;

use ng_graph_core::logging::NullLogger;
use ng_graph_core::model::EdgeKind;
use support::FixtureProject;

fn build_fixture() -> FixtureProject {
    let project = FixtureProject::new("s5");

    project.write(
        "home.component.ts",
        r#"
import { Component } from '@angular/core';
import { Router } from '@angular/router';

@Component({
  selector: 'app-home',
  template: '<button (click)="goToUsers()">Users</button>',
})
export class HomeComponent {
  constructor(private router: Router) {}

  goToUsers() {
    this.router.navigate(['/users']);
  }
}
"#,
    );

    project.write(
        "users.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-users',
  template: '<span>users</span>',
})
export class UsersComponent {}
"#,
    );

    project.write(
        "app-routing.module.ts",
        r#"
import { NgModule } from '@angular/core';
import { RouterModule, Routes } from '@angular/router';
import { HomeComponent } from './home.component';
import { UsersComponent } from './users.component';

const routes: Routes = [
  { path: 'home', component: HomeComponent },
  { path: 'users', component: UsersComponent },
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
import { UsersComponent } from './users.component';
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [HomeComponent, UsersComponent],
  imports: [AppRoutingModule],
  bootstrap: [HomeComponent],
})
export class AppModule {}
"#,
    );

    project
}

#[test]
fn click_handler_navigate_call_resolves_to_target_route() {
    let project = build_fixture();
    let logger = NullLogger;
    let output = ng_graph_core::run(project.root(), &project.tsconfig_path(), &logger)
        .expect("pipeline run should succeed for a well-formed fixture");

    let home_component = output
        .components
        .values()
        .find(|c| c.name == "HomeComponent")
        .expect("HomeComponent should be extracted");
    let users_route = output
        .routes
        .routes
        .values()
        .find(|r| r.full_path() == "/users")
        .expect("/users route should exist");

    let component_nav_edges: Vec<_> = output
        .graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::ComponentNavigatesRoute)
        .collect();
    assert_eq!(component_nav_edges.len(), 1);
    assert_eq!(component_nav_edges[0].from, home_component.id);
    assert_eq!(component_nav_edges[0].to.as_deref(), Some(users_route.id()));

    let trigger_edges: Vec<_> = output
        .graph
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::WidgetTriggersHandler)
        .collect();
    assert_eq!(trigger_edges.len(), 1);
    assert_eq!(trigger_edges[0].to.as_deref(), Some(home_component.id.as_str()));
    let handler = trigger_edges[0].handler.as_ref().expect("handler metadata should be set");
    assert_eq!(handler.method_name, "goToUsers");
    assert_eq!(handler.component_id, home_component.id);
}
