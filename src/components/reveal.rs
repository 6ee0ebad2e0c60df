//! Reveal-on-scroll wrapper.
//!
//! Wraps its children in a `div` that gains the `revealed` class the first
//! time it scrolls into view, using an `IntersectionObserver`. The default
//! options watch for 10% visibility with a 100px bottom margin and stop
//! observing after the first reveal.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

/// Observer settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealOptions {
	/// Visible fraction that counts as intersecting.
	pub threshold: f64,
	/// CSS margin around the viewport.
	pub root_margin: String,
	/// Stay revealed and stop observing after the first intersection.
	pub once: bool,
}

impl Default for RevealOptions {
	fn default() -> Self {
		Self {
			threshold: 0.1,
			root_margin: "0px 0px 100px 0px".to_string(),
			once: true,
		}
	}
}

/// What the observer callback should do after an intersection report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
	/// Reveal the children.
	Show,
	/// Hide the children again.
	Hide,
	/// Show, then disconnect the observer.
	ShowAndDisconnect,
	/// Nothing changes.
	Ignore,
}

/// Visibility state driven by intersection reports.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevealState {
	visible: bool,
	disconnected: bool,
	once: bool,
}

impl RevealState {
	/// Hidden state. With `once`, the first reveal is final.
	pub fn new(once: bool) -> Self {
		Self {
			once,
			..Self::default()
		}
	}

	/// Children should be shown.
	pub fn visible(&self) -> bool {
		self.visible
	}

	/// The observer is no longer needed.
	pub fn disconnected(&self) -> bool {
		self.disconnected
	}

	/// Feed one intersection report.
	pub fn observe(&mut self, intersecting: bool) -> Transition {
		if self.disconnected {
			return Transition::Ignore;
		}
		match (intersecting, self.visible) {
			(true, _) if self.once => {
				self.visible = true;
				self.disconnected = true;
				Transition::ShowAndDisconnect
			}
			(true, false) => {
				self.visible = true;
				Transition::Show
			}
			(false, true) => {
				self.visible = false;
				Transition::Hide
			}
			_ => Transition::Ignore,
		}
	}

	/// Stop reacting to reports, keeping the current visibility.
	pub fn disconnect(&mut self) {
		self.disconnected = true;
	}
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Live observer plus the callback it calls into.
struct Observation {
	observer: IntersectionObserver,
	state: Rc<RefCell<RevealState>>,
	_callback: ObserverCallback,
}

impl Observation {
	fn start(
		target: &Element,
		options: &RevealOptions,
		revealed: WriteSignal<bool>,
	) -> Result<Self, JsValue> {
		let state = Rc::new(RefCell::new(RevealState::new(options.once)));
		let state_cb = state.clone();

		let callback: ObserverCallback = Closure::new(
			move |entries: js_sys::Array, observer: IntersectionObserver| {
				for entry in entries.iter() {
					let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
						continue;
					};
					match state_cb.borrow_mut().observe(entry.is_intersecting()) {
						Transition::Show => revealed.set(true),
						Transition::Hide => revealed.set(false),
						Transition::ShowAndDisconnect => {
							revealed.set(true);
							observer.disconnect();
						}
						Transition::Ignore => {}
					}
				}
			},
		);

		let init = IntersectionObserverInit::new();
		init.set_threshold(&JsValue::from_f64(options.threshold));
		init.set_root_margin(&options.root_margin);

		let observer =
			IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
		observer.observe(target);

		Ok(Self {
			observer,
			state,
			_callback: callback,
		})
	}

	fn stop(&self) {
		self.state.borrow_mut().disconnect();
		self.observer.disconnect();
	}
}

/// Fades its children in once they scroll into view.
///
/// The wrapper carries `data-revealed="true|false"` and, once visible, the
/// `revealed` class; the transition itself is left to CSS. If the browser
/// has no `IntersectionObserver`, children are shown immediately.
#[component]
pub fn Reveal(
	#[prop(optional)] options: Option<RevealOptions>,
	#[prop(optional, into)] class: String,
	children: Children,
) -> impl IntoView {
	let options = options.unwrap_or_default();
	let target = NodeRef::<leptos::html::Div>::new();
	let (revealed, set_revealed) = signal(false);
	let observation: Rc<RefCell<Option<Observation>>> = Rc::new(RefCell::new(None));
	let observation_init = observation.clone();

	Effect::new(move |_| {
		let Some(div) = target.get() else {
			return;
		};
		if observation_init.borrow().is_some() {
			return;
		}
		let element: &Element = div.as_ref();
		match Observation::start(element, &options, set_revealed) {
			Ok(obs) => *observation_init.borrow_mut() = Some(obs),
			Err(e) => {
				warn!("neural-canvas: reveal observer unavailable: {:?}", e);
				set_revealed.set(true);
			}
		}
	});

	let observation_slot = StoredValue::new_local(observation);
	on_cleanup(move || {
		observation_slot.try_with_value(|slot| {
			if let Some(obs) = slot.borrow_mut().take() {
				obs.stop();
			}
		});
	});

	let class_list = move || {
		if revealed.get() {
			format!("reveal revealed {class}")
		} else {
			format!("reveal {class}")
		}
	};

	view! {
		<div
			node_ref=target
			class=class_list
			data-revealed=move || revealed.get().to_string()
		>
			{children()}
		</div>
	}
}
