//! Application state for the payroll API.

use std::sync::Arc;

use crate::calculation::{SeededTipDraw, TipPoolDraw};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded configuration and the tip pool draw every request
/// uses, so all slips for a period see the same pool.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    tip_draw: Arc<dyn TipPoolDraw>,
}

impl AppState {
    /// Creates the state with a draw seeded from the configured pool seed.
    pub fn new(config: ConfigLoader) -> Self {
        let tip_draw = SeededTipDraw::from_settings(&config.settings().tip_pool);
        Self::with_tip_draw(config, tip_draw)
    }

    /// Creates the state with an explicit tip pool draw.
    pub fn with_tip_draw(config: ConfigLoader, tip_draw: impl TipPoolDraw + 'static) -> Self {
        Self {
            config: Arc::new(config),
            tip_draw: Arc::new(tip_draw),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the tip pool draw.
    pub fn tip_draw(&self) -> &dyn TipPoolDraw {
        self.tip_draw.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::FixedTipDraw;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_explicit_draw_is_used() {
        let state = AppState::with_tip_draw(
            ConfigLoader::builtin().unwrap(),
            FixedTipDraw(Decimal::new(5, 2)),
        );
        let period = "6/2024".parse().unwrap();
        assert_eq!(
            state.tip_draw().variation(&period, Decimal::new(15, 2)),
            Decimal::new(5, 2)
        );
    }
}
