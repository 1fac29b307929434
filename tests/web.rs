//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_field::{Canvas2dSurface, FieldConfig, ParticleBackground, Surface};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap()
}

#[wasm_bindgen_test]
fn attach_runs_until_detached() {
    let mut background = ParticleBackground::attach(canvas()).expect("2d context");
    assert!(background.is_running());
    assert_eq!(background.particle_count(), 150);

    background.detach();
    assert!(!background.is_running());
    assert_eq!(background.particle_count(), 0);
    background.detach();
}

#[wasm_bindgen_test]
fn attach_with_config_uses_population() {
    let mut config = FieldConfig::new();
    config.population = 12;
    let background = ParticleBackground::attach_with_config(canvas(), config).unwrap();
    assert_eq!(background.particle_count(), 12);
}

#[wasm_bindgen_test]
fn canvas_without_2d_context_is_skipped() {
    let canvas = canvas();
    // once a canvas has a webgl context it can no longer hand out a 2d one
    let _gl = canvas.get_context("webgl").unwrap();
    if _gl.is_some() {
        assert!(ParticleBackground::attach(canvas).is_none());
    }
}

#[wasm_bindgen_test]
fn surface_resize_sets_backing_store() {
    let canvas = canvas();
    let mut surface = Canvas2dSurface::from_canvas(&canvas).unwrap();
    surface.resize(320.0, 200.0);
    assert_eq!(canvas.width(), 320);
    assert_eq!(canvas.height(), 200);
}

#[wasm_bindgen_test]
fn mount_appends_and_detach_removes_canvas() {
    let document = web_sys::window().unwrap().document().unwrap();
    let before = document.get_elements_by_tag_name("canvas").length();
    let mut background = ParticleBackground::mount().unwrap().unwrap();
    assert_eq!(
        document.get_elements_by_tag_name("canvas").length(),
        before + 1
    );
    background.detach();
    assert_eq!(document.get_elements_by_tag_name("canvas").length(), before);
}
