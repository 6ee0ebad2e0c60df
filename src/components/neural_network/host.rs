//! Browser implementation of [`FrameHost`].
//!
//! Owns the canvas, its 2d context and the JS callbacks for
//! `requestAnimationFrame`, window resize and canvas mouse events. Callbacks
//! reach the driver through a `Weak` reference, so the driver and its host
//! never keep each other alive and a callback that fires after the driver is
//! gone does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::driver::{AnimationDriver, FrameHost, FrameId, HostError};
use super::render;
use super::state::NetworkState;
use super::theme::Theme;

/// Driver shared between the component and the browser callbacks.
pub type SharedDriver = Rc<RefCell<AnimationDriver<BrowserHost>>>;

struct Callbacks {
	frame: Closure<dyn FnMut(f64)>,
	resize: Closure<dyn FnMut()>,
	pointer_move: Closure<dyn FnMut(MouseEvent)>,
	pointer_leave: Closure<dyn FnMut(MouseEvent)>,
}

/// A canvas element on the current page.
pub struct BrowserHost {
	window: Window,
	canvas: HtmlCanvasElement,
	ctx: Option<CanvasRenderingContext2d>,
	theme: Theme,
	callbacks: Option<Callbacks>,
	attached: bool,
}

impl BrowserHost {
	/// Acquire the canvas' 2d context.
	pub fn new(canvas: HtmlCanvasElement, theme: Theme) -> Result<Self, HostError> {
		let window = web_sys::window().ok_or(HostError::NoWindow)?;
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| HostError::NoContext(format!("{e:?}")))?
			.ok_or_else(|| HostError::NoContext("canvas returned no 2d context".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| HostError::NoContext("not a CanvasRenderingContext2d".into()))?;

		Ok(Self {
			window,
			canvas,
			ctx: Some(ctx),
			theme,
			callbacks: None,
			attached: false,
		})
	}

	/// Create the browser callbacks for `driver` and hand them to its host.
	pub fn bind(driver: &SharedDriver) {
		let weak = Rc::downgrade(driver);

		let frame = {
			let weak = weak.clone();
			Closure::new(move |time: f64| {
				if let Some(d) = weak.upgrade() {
					d.borrow_mut().on_frame(time);
				}
			})
		};
		let resize = {
			let weak = weak.clone();
			Closure::new(move || {
				if let Some(d) = weak.upgrade() {
					d.borrow_mut().on_resize();
				}
			})
		};
		let pointer_move = {
			let weak = weak.clone();
			Closure::new(move |ev: MouseEvent| {
				if let Some(d) = weak.upgrade() {
					let mut d = d.borrow_mut();
					let (x, y) = d.host().client_to_canvas(&ev);
					d.on_pointer_move(x, y);
				}
			})
		};
		let pointer_leave = Closure::new(move |_: MouseEvent| {
			if let Some(d) = weak.upgrade() {
				d.borrow_mut().on_pointer_leave();
			}
		});

		driver.borrow_mut().host_mut().callbacks = Some(Callbacks {
			frame,
			resize,
			pointer_move,
			pointer_leave,
		});
	}

	/// Convert viewport coordinates of a mouse event to canvas CSS pixels.
	fn client_to_canvas(&self, ev: &MouseEvent) -> (f64, f64) {
		let rect = self.canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	}
}

impl FrameHost for BrowserHost {
	fn layout_size(&self) -> (f64, f64) {
		match self.canvas.parent_element() {
			Some(parent) => (parent.client_width() as f64, parent.client_height() as f64),
			None => {
				let rect = self.canvas.get_bounding_client_rect();
				(rect.width(), rect.height())
			}
		}
	}

	fn device_pixel_ratio(&self) -> f64 {
		self.window.device_pixel_ratio()
	}

	fn configure_surface(&mut self, width: f64, height: f64, dpr: f64) {
		self.canvas.set_width((width.max(0.0) * dpr) as u32);
		self.canvas.set_height((height.max(0.0) * dpr) as u32);
		// Resizing the backing store resets the transform, so this never compounds
		if let Some(ref ctx) = self.ctx {
			let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
		}
	}

	fn attach_listeners(&mut self) -> Result<(), HostError> {
		let cb = self.callbacks.as_ref().ok_or(HostError::Unbound)?;
		if self.attached {
			return Ok(());
		}

		let listener_err = |event: &'static str| {
			move |e: JsValue| HostError::Listener {
				event,
				reason: format!("{e:?}"),
			}
		};

		self.window
			.add_event_listener_with_callback("resize", cb.resize.as_ref().unchecked_ref())
			.map_err(listener_err("resize"))?;
		self.attached = true;
		self.canvas
			.add_event_listener_with_callback("mousemove", cb.pointer_move.as_ref().unchecked_ref())
			.map_err(listener_err("mousemove"))?;
		self.canvas
			.add_event_listener_with_callback(
				"mouseleave",
				cb.pointer_leave.as_ref().unchecked_ref(),
			)
			.map_err(listener_err("mouseleave"))?;
		Ok(())
	}

	fn detach_listeners(&mut self) {
		if !self.attached {
			return;
		}
		if let Some(ref cb) = self.callbacks {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.resize.as_ref().unchecked_ref());
			let _ = self.canvas.remove_event_listener_with_callback(
				"mousemove",
				cb.pointer_move.as_ref().unchecked_ref(),
			);
			let _ = self.canvas.remove_event_listener_with_callback(
				"mouseleave",
				cb.pointer_leave.as_ref().unchecked_ref(),
			);
		}
		self.attached = false;
	}

	fn request_frame(&mut self) -> Result<FrameId, HostError> {
		let cb = self.callbacks.as_ref().ok_or(HostError::Unbound)?;
		self.window
			.request_animation_frame(cb.frame.as_ref().unchecked_ref())
			.map_err(|e| HostError::FrameRequest(format!("{e:?}")))
	}

	fn cancel_frame(&mut self, id: FrameId) {
		let _ = self.window.cancel_animation_frame(id);
	}

	fn present(&mut self, state: &NetworkState) {
		if let Some(ref ctx) = self.ctx {
			render::render(ctx, state, &self.theme, state.time_ms);
		}
	}

	fn release_surface(&mut self) {
		self.ctx = None;
		self.callbacks = None;
	}
}
