use wasm_bindgen::prelude::*;

/// Per-advance snapshot, all zeros unless metrics are enabled.
#[wasm_bindgen]
#[derive(Clone, Default)]
pub struct PerfStats {
    pub(super) advance_ms: f64,
    pub(super) ticks: u32,
    pub(super) relax_passes: u32,
    pub(super) point_count: u32,
    pub(super) constraint_count: u32,
    pub(super) events_pending: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn advance_ms(&self) -> f64 { self.advance_ms }
    #[wasm_bindgen(getter)]
    pub fn ticks(&self) -> u32 { self.ticks }
    #[wasm_bindgen(getter)]
    pub fn relax_passes(&self) -> u32 { self.relax_passes }
    #[wasm_bindgen(getter)]
    pub fn point_count(&self) -> u32 { self.point_count }
    #[wasm_bindgen(getter)]
    pub fn constraint_count(&self) -> u32 { self.constraint_count }
    #[wasm_bindgen(getter)]
    pub fn events_pending(&self) -> u32 { self.events_pending }
}
