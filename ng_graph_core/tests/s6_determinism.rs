//! S6 — determinism (spec.md §8): running the pipeline twice over the
//! same project writes byte-identical `phase1-bundle.json` output.

mod support;

use std::fs;

use ng_graph_core::logging::NullLogger;
use support::FixtureProject;

fn build_fixture() -> FixtureProject {
    let project = FixtureProject::new("s6");

    project.write(
        "home.component.ts",
        r#"
import { Component } from '@angular/core';

@Component({
  selector: 'app-home',
  template: '<a routerLink="/about">About</a><button (click)="save()">Save</button>',
})
export class HomeComponent {
  save() {
    this.homeService.persist();
  }
}
"#,
    );

    project.write(
        "home.service.ts",
        r#"
import { Injectable } from '@angular/core';

@Injectable({ providedIn: 'root' })
export class HomeService {
  persist() {}
}
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
import { HomeService } from './home.service';
import { AppRoutingModule } from './app-routing.module';

@NgModule({
  declarations: [HomeComponent, AboutComponent],
  imports: [AppRoutingModule],
  providers: [HomeService],
  bootstrap: [HomeComponent],
})
export class AppModule {}
"#,
    );

    project
}

#[test]
fn repeated_runs_write_byte_identical_bundles() {
    let project = build_fixture();
    let logger = NullLogger;

    let out_a = project.root().join("out-a");
    let out_b = project.root().join("out-b");

    ng_graph_core::run_and_write(project.root(), &project.tsconfig_path(), &out_a, false, &logger)
        .expect("first run should succeed");
    ng_graph_core::run_and_write(project.root(), &project.tsconfig_path(), &out_b, false, &logger)
        .expect("second run should succeed");

    let bytes_a = fs::read(out_a.join("phase1-bundle.json")).expect("first bundle should exist");
    let bytes_b = fs::read(out_b.join("phase1-bundle.json")).expect("second bundle should exist");

    assert_eq!(bytes_a, bytes_b, "repeated runs must produce byte-identical bundles");
}
