//! neural-canvas: animated neural-network particle background.
//!
//! This crate provides a WASM canvas component that renders drifting,
//! layered points joined by proximity links, reacting to the pointer, plus a
//! small reveal-on-scroll wrapper for the sections it decorates.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::neural_network::{
	NetworkConfig, NeuralNetworkCanvas, Theme, ThemeName, Variant, load_config,
};
pub use components::reveal::{Reveal, RevealOptions};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("neural-canvas: logging initialized");
}

/// Main application component.
/// Reads optional config overrides from the DOM and renders a fullscreen
/// animated hero.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Neural Canvas" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Reveal class="fullscreen-hero">
			<NeuralNetworkCanvas config=config variant=Variant::Hero />
			<div class="hero-overlay">
				<h1>"Neural Canvas"</h1>
				<p class="subtitle">"Move the pointer over the network to push the points around."</p>
			</div>
		</Reveal>
	}
}
