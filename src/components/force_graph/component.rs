use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::ForceGraphState;
use crate::analysis::RankedGraph;

fn window_size(window: &Window) -> (f64, f64) {
	(
		window
			.inner_width()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(800.0),
		window
			.inner_height()
			.ok()
			.and_then(|v| v.as_f64())
			.unwrap_or(600.0),
	)
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn update_cursor(canvas: &HtmlCanvasElement, state: &ForceGraphState) {
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", state.cursor());
}

#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<RankedGraph>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let unmounted = Arc::new(AtomicBool::new(false));
	let resize_handle: Arc<Mutex<Option<WindowListenerHandle>>> = Arc::new(Mutex::new(None));
	let (state_init, animate_init, unmounted_init, resize_handle_init) = (
		state.clone(),
		animate.clone(),
		unmounted.clone(),
		resize_handle.clone(),
	);

	on_cleanup(move || {
		unmounted.store(true, Ordering::Relaxed);
		if let Some(handle) = resize_handle.lock().ok().and_then(|mut slot| slot.take()) {
			handle.remove();
		}
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};
		let seed = js_sys::Date::now() as u64;
		*state_init.borrow_mut() = Some(ForceGraphState::new(&data.get_untracked(), w, h, seed));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			let handle = window_event_listener(leptos::ev::resize, move |_| {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			});
			if let Ok(mut slot) = resize_handle_init.lock() {
				*slot = Some(handle);
			}
		}

		let (state_anim, animate_inner, canvas_anim, unmounted_anim) = (
			state_init.clone(),
			animate_init.clone(),
			canvas.clone(),
			unmounted_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let cancelled = unmounted_anim.load(Ordering::Relaxed) || !canvas_anim.is_connected();
			let running = match *state_anim.borrow_mut() {
				Some(ref mut s) => {
					if cancelled {
						s.stop();
					} else {
						s.tick(timestamp / 1000.0);
						render::render(s, &ctx);
					}
					s.is_running()
				}
				None => false,
			};
			if !running {
				debug!("canvas released, ending animation loop");
				let _ = animate_inner.borrow_mut().take();
				return;
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_data = state.clone();
	Effect::new(move |prev: Option<()>| {
		let graph = data.get();
		// The first run is covered by the setup effect above.
		if prev.is_none() {
			return;
		}
		if let Some(ref mut s) = *state_data.borrow_mut() {
			s.replace_data(&graph);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.pointer_down(x, y);
			update_cursor(&canvas, s);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
			update_cursor(&canvas, s);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
			update_cursor(&canvas, s);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
			update_cursor(&canvas, s);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: default;"
		/>
	}
}
