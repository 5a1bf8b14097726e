//! # Customizer State
//!
//! The chair picker selections. Not persisted: every session starts from
//! the default chair.

use std::sync::{Arc, Mutex};

use atelier_core::ChairCustomizer;

#[derive(Debug, Clone, Default)]
pub struct CustomizerState {
    customizer: Arc<Mutex<ChairCustomizer>>,
}

impl CustomizerState {
    pub fn new() -> Self {
        CustomizerState::default()
    }

    pub fn with_customizer<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ChairCustomizer) -> R,
    {
        let customizer = self.customizer.lock().expect("Customizer mutex poisoned");
        f(&customizer)
    }

    pub fn with_customizer_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ChairCustomizer) -> R,
    {
        let mut customizer = self.customizer.lock().expect("Customizer mutex poisoned");
        f(&mut customizer)
    }
}
