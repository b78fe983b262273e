// Page glue: size the canvas to the window, hook up pointer/resize/click
// listeners and run the requestAnimationFrame loop. Everything shares one
// ParticleCanvas on the JS thread, so a resize can never land mid-frame.

use crate::error::SimError;
use crate::utils;
use crate::ParticleCanvas;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, HtmlCanvasElement, MouseEvent, Window};

#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    start_with_config(canvas_id, "{}")
}

#[wasm_bindgen]
pub fn start_with_config(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    utils::set_panic_hook();

    let window = window()?;
    let canvas = find_canvas(&window, canvas_id)?;
    let (width, height) = inner_size(&window)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let sim = Rc::new(RefCell::new(ParticleCanvas::with_config(canvas, config_json)?));

    {
        let sim = sim.clone();
        let win = window.clone();
        let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| match inner_size(&win) {
            Ok((w, h)) => sim.borrow_mut().resize(w, h),
            Err(e) => console::error_1(&e.into()),
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    {
        let sim = sim.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            sim.borrow_mut()
                .set_pointer(event.client_x() as f64, event.client_y() as f64);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    {
        let sim = sim.clone();
        let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
            if let Err(e) = sim.borrow_mut().toggle_background() {
                console::error_1(&e);
            }
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    // The frame closure holds an Rc to itself so it can reschedule, which keeps
    // it alive for the lifetime of the page.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(e) = sim.borrow_mut().frame() {
            console::error_1(&e);
        }
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = request_animation_frame(callback) {
                console::error_1(&e);
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = g.borrow().as_ref() {
        request_animation_frame(callback)?;
    }
    Ok(())
}

fn window() -> Result<Window, SimError> {
    web_sys::window().ok_or_else(|| SimError::Dom("no global `window`".to_owned()))
}

fn find_canvas(window: &Window, canvas_id: &str) -> Result<HtmlCanvasElement, SimError> {
    window
        .document()
        .ok_or_else(|| SimError::Dom("window has no document".to_owned()))?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| SimError::Dom(format!("no element with id '{}'", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SimError::Dom(format!("element '{}' is not a canvas", canvas_id)))
}

fn inner_size(window: &Window) -> Result<(u32, u32), SimError> {
    let dimension = |value: Result<JsValue, JsValue>, name: &str| -> Result<u32, SimError> {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .ok_or_else(|| SimError::Dom(format!("window.{} is not a number", name)))
    };
    let width = dimension(window.inner_width(), "innerWidth")?;
    let height = dimension(window.inner_height(), "innerHeight")?;
    Ok((width, height))
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}
