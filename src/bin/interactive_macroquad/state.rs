use std::cell::Cell;
use std::rc::Rc;

use parabolic_sim::{EngineConfig, GravityPreset, LaunchParameters, SimError, SimulationEngine};

/// Slider-backed launch inputs. Sliders edit `f32`; the engine receives
/// validated `f64` parameters whenever it is not mid-flight.
#[derive(Clone, Copy)]
pub(crate) struct LaunchDraft {
    pub(crate) speed_mps: f32,
    pub(crate) angle_deg: f32,
    pub(crate) gravity_mps2: f32,
    pub(crate) preset: Option<GravityPreset>,
}

impl LaunchDraft {
    fn from_params(params: &LaunchParameters) -> Self {
        Self {
            speed_mps: params.speed_mps() as f32,
            angle_deg: params.angle_deg() as f32,
            gravity_mps2: params.gravity_mps2() as f32,
            preset: Some(GravityPreset::Earth),
        }
    }

    pub(crate) fn apply_preset(&mut self, preset: GravityPreset) {
        self.preset = Some(preset);
        self.gravity_mps2 = preset.gravity_mps2() as f32;
    }

    pub(crate) fn environment_name(&self) -> &'static str {
        self.preset.map_or("Custom", GravityPreset::name)
    }

    fn to_params(self, config: &EngineConfig) -> Result<LaunchParameters, SimError> {
        LaunchParameters::new(
            f64::from(self.speed_mps),
            config.clamp_angle(f64::from(self.angle_deg)),
            f64::from(self.gravity_mps2),
        )
    }
}

pub(crate) struct AppRuntime {
    pub(crate) engine: SimulationEngine,
    pub(crate) draft: LaunchDraft,
    pub(crate) show_preview: bool,
    pub(crate) status_line: String,
    landed: Rc<Cell<bool>>,
}

impl AppRuntime {
    pub(crate) fn new() -> Result<Self, SimError> {
        let params = LaunchParameters::default();
        let mut engine = SimulationEngine::manual(EngineConfig::default(), params)?;

        let landed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&landed);
        engine.set_on_completed(move || flag.set(true));

        Ok(Self {
            engine,
            draft: LaunchDraft::from_params(&params),
            show_preview: true,
            status_line: "Ready".to_string(),
            landed,
        })
    }

    /// Pushes slider values into the engine. Mid-flight edits wait until the
    /// run is paused or reset.
    pub(crate) fn sync_draft(&mut self) {
        if self.engine.is_playing() {
            return;
        }
        let params = match self.draft.to_params(self.engine.config()) {
            Ok(params) => params,
            Err(err) => {
                self.status_line = err.to_string();
                return;
            }
        };
        if params == *self.engine.parameters() {
            return;
        }
        if let Err(err) = self.engine.set_parameters(params) {
            self.status_line = err.to_string();
        }
    }

    /// True once per landing.
    pub(crate) fn take_landed(&self) -> bool {
        self.landed.replace(false)
    }
}
