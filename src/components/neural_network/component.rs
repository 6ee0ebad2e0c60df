//! Leptos component wrapping the neural network canvas.
//!
//! The component renders a `<canvas>` that fills its parent. Once the node
//! exists, an effect acquires the 2d context, builds the driver and starts
//! the `requestAnimationFrame` loop; component cleanup tears it down again.
//! If the context cannot be acquired the canvas simply stays blank.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::HtmlCanvasElement;

use super::config::{NetworkConfig, Variant};
use super::driver::{AnimationDriver, HostError};
use super::host::{BrowserHost, SharedDriver};
use super::state::NetworkState;
use super::theme::Theme;

/// Renders the animated point/line network on a canvas sized by its parent.
///
/// Pass a full `config` to control everything, or pick a preset with
/// `variant` (ignored when `config` is set).
#[component]
pub fn NeuralNetworkCanvas(
	#[prop(default = None)] config: Option<NetworkConfig>,
	#[prop(optional)] variant: Variant,
	#[prop(optional, into)] class: String,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let driver: Rc<RefCell<Option<SharedDriver>>> = Rc::new(RefCell::new(None));
	let driver_init = driver.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if driver_init.borrow().is_some() {
			return;
		}

		let config = config.clone().unwrap_or_else(|| variant.config());
		match start(canvas, config) {
			Ok(d) => *driver_init.borrow_mut() = Some(d),
			Err(e) => warn!("neural-canvas: animation disabled: {}", e),
		}
	});

	let driver_slot = StoredValue::new_local(driver);
	on_cleanup(move || {
		driver_slot.try_with_value(|slot| {
			if let Some(d) = slot.borrow_mut().take() {
				d.borrow_mut().teardown();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class=format!("neural-network-canvas {class}")
			style="display: block; width: 100%; height: 100%; background: transparent;"
		/>
	}
}

/// Build a driver for `canvas`, bind its callbacks and mount it.
fn start(canvas: HtmlCanvasElement, config: NetworkConfig) -> Result<SharedDriver, HostError> {
	let theme = Theme::from(config.theme);
	debug!("neural-canvas: starting with theme '{}'", theme.name);
	let host = BrowserHost::new(canvas, theme)?;
	let driver = Rc::new(RefCell::new(AnimationDriver::new(
		host,
		NetworkState::new(config),
	)));

	BrowserHost::bind(&driver);
	driver.borrow_mut().mount()?;
	Ok(driver)
}
