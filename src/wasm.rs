//! WebAssembly bindings for Lenia.
//!
//! Provides a thin wrapper around `Propagator` for browser drivers. Rendering stays on
//! the JavaScript side; this module only hands out copies of the current buffer.

use wasm_bindgen::prelude::*;

use crate::{
    compute::{Propagator, SimulationStats},
    schema::{Pattern, Seed, SimulationConfig},
};

/// Initialize WASM module with panic hook and logging.
#[wasm_bindgen(start)]
pub fn init() {
    // Set panic hook for better error messages in browser
    console_error_panic_hook::set_once();

    // Initialize WASM logger
    wasm_logger::init(wasm_logger::Config::default());
}

/// WebAssembly wrapper for the Lenia propagator.
#[wasm_bindgen]
pub struct WasmSimulation {
    propagator: Propagator,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// Create new simulation from JSON configuration.
    ///
    /// # Arguments
    /// * `config_json` - JSON string containing SimulationConfig
    /// * `seed_json` - JSON string containing Seed
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, seed_json: &str) -> Result<WasmSimulation, JsValue> {
        let config = SimulationConfig::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;

        let seed: Seed = serde_json::from_str(seed_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid seed JSON: {e}")))?;

        let propagator = Propagator::new(config, seed)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;

        Ok(WasmSimulation { propagator })
    }

    /// Perform one simulation step.
    #[wasm_bindgen]
    pub fn step(&mut self) {
        self.propagator.step();
    }

    /// Run multiple simulation steps.
    #[wasm_bindgen]
    pub fn run(&mut self, steps: u64) {
        self.propagator.run(steps);
    }

    /// Copy of the current buffer (row-major, width * height values).
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Vec<f32> {
        self.propagator.current().to_vec()
    }

    /// Get simulation statistics as JSON.
    #[wasm_bindgen(js_name = getStats)]
    pub fn get_stats(&self) -> Result<JsValue, JsValue> {
        let stats = SimulationStats::from_grid(self.propagator.grid());
        serde_wasm_bindgen::to_value(&stats)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Resize the grid. Returns false (and changes nothing) for zero dimensions.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        self.propagator.resize(width, height).is_some()
    }

    /// Reseed with a named pattern ("blank", "noise", "orbium").
    #[wasm_bindgen(js_name = seedPattern)]
    pub fn seed_pattern(&mut self, name: &str) -> Result<(), JsValue> {
        let pattern: Pattern = name
            .parse()
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        self.propagator.seed_pattern(pattern);
        Ok(())
    }

    /// Reset simulation with new seed.
    #[wasm_bindgen]
    pub fn reset(&mut self, seed_json: &str) -> Result<(), JsValue> {
        let seed: Seed = serde_json::from_str(seed_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid seed JSON: {e}")))?;
        self.propagator.reset(seed);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn paint(&mut self, x: f32, y: f32, radius: f32, intensity: f32) {
        self.propagator.paint(x, y, radius, intensity);
    }

    /// Paint with the configured brush.
    #[wasm_bindgen(js_name = paintBrush)]
    pub fn paint_brush(&mut self, x: f32, y: f32) {
        self.propagator.paint_brush(x, y);
    }

    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, x: i32, y: i32, value: f32) {
        self.propagator.set_value(x as i64, y as i64, value);
    }

    #[wasm_bindgen(js_name = setDt)]
    pub fn set_dt(&mut self, dt: f32) {
        self.propagator.set_dt(dt);
    }

    #[wasm_bindgen(js_name = setKernelRadius)]
    pub fn set_kernel_radius(&mut self, radius: f32) {
        self.propagator.set_kernel_radius(radius);
    }

    #[wasm_bindgen(js_name = setGrowthMean)]
    pub fn set_growth_mean(&mut self, mu: f32) {
        self.propagator.set_growth_mean(mu);
    }

    #[wasm_bindgen(js_name = setGrowthSigma)]
    pub fn set_growth_sigma(&mut self, sigma: f32) {
        self.propagator.set_growth_sigma(sigma);
    }

    #[wasm_bindgen(js_name = setBrushSize)]
    pub fn set_brush_size(&mut self, size: f32) {
        self.propagator.set_brush_size(size);
    }

    #[wasm_bindgen(js_name = setBrushIntensity)]
    pub fn set_brush_intensity(&mut self, intensity: f32) {
        self.propagator.set_brush_intensity(intensity);
    }

    /// Get total population (sum of all cells).
    #[wasm_bindgen(js_name = totalPopulation)]
    pub fn total_population(&self) -> f32 {
        self.propagator.total_population()
    }

    /// Get current simulation time.
    #[wasm_bindgen(js_name = getTime)]
    pub fn get_time(&self) -> f32 {
        self.propagator.time()
    }

    /// Get current step count.
    #[wasm_bindgen(js_name = getStep)]
    pub fn get_step(&self) -> u64 {
        self.propagator.step_count()
    }

    /// Get grid width.
    #[wasm_bindgen(js_name = getWidth)]
    pub fn get_width(&self) -> usize {
        self.propagator.width()
    }

    /// Get grid height.
    #[wasm_bindgen(js_name = getHeight)]
    pub fn get_height(&self) -> usize {
        self.propagator.height()
    }
}
