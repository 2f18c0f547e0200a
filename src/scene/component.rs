//! Concrete component kinds and their property capability.
//!
//! Each kind exposes its blendable fields by name through [`PropertyAccess`].
//! Lookups are plain `match` arms on the property name, so there is no
//! runtime reflection: an unknown name simply yields `None`/`false`.

use rustc_hash::FxHashMap;

use crate::color::{Color, ColorValue, LinearColor};

/// Late-bound access to named scalar and color properties.
pub trait PropertyAccess {
    fn scalar(&self, name: &str) -> Option<f32>;

    /// Returns false when the property does not exist.
    fn set_scalar(&mut self, name: &str, value: f32) -> bool;

    fn color(&self, name: &str) -> Option<ColorValue>;

    /// Returns false when the property does not exist or `value` is not in
    /// the property's declared representation.
    fn set_color(&mut self, name: &str, value: ColorValue) -> bool;
}

fn write_srgb(slot: &mut Color, value: ColorValue) -> bool {
    match value {
        ColorValue::Srgb(c) => {
            *slot = c;
            true
        }
        ColorValue::Linear(_) => false,
    }
}

fn write_linear(slot: &mut LinearColor, value: ColorValue) -> bool {
    match value {
        ColorValue::Linear(c) => {
            *slot = c;
            true
        }
        ColorValue::Srgb(_) => false,
    }
}

// ============================================================================
// Lights
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub intensity: f32,
    pub light_color: Color,
    pub temperature: f32,
    pub indirect_lighting_intensity: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            intensity: 10.0,
            light_color: Color::WHITE,
            temperature: 6500.0,
            indirect_lighting_intensity: 1.0,
        }
    }
}

impl PropertyAccess for DirectionalLight {
    fn scalar(&self, name: &str) -> Option<f32> {
        match name {
            "Intensity" => Some(self.intensity),
            "Temperature" => Some(self.temperature),
            "IndirectLightingIntensity" => Some(self.indirect_lighting_intensity),
            _ => None,
        }
    }

    fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        let slot = match name {
            "Intensity" => &mut self.intensity,
            "Temperature" => &mut self.temperature,
            "IndirectLightingIntensity" => &mut self.indirect_lighting_intensity,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn color(&self, name: &str) -> Option<ColorValue> {
        match name {
            "LightColor" => Some(ColorValue::Srgb(self.light_color)),
            _ => None,
        }
    }

    fn set_color(&mut self, name: &str, value: ColorValue) -> bool {
        match name {
            "LightColor" => write_srgb(&mut self.light_color, value),
            _ => false,
        }
    }
}

/// Environment light. Its captured cubemap is only refreshed on recapture.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyLight {
    pub intensity: f32,
    pub light_color: Color,
    pub lower_hemisphere_color: LinearColor,
    /// Number of recaptures performed so far.
    pub capture_count: u32,
}

impl Default for SkyLight {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            light_color: Color::WHITE,
            lower_hemisphere_color: LinearColor::BLACK,
            capture_count: 0,
        }
    }
}

impl SkyLight {
    pub fn recapture(&mut self) {
        self.capture_count = self.capture_count.wrapping_add(1);
    }
}

impl PropertyAccess for SkyLight {
    fn scalar(&self, name: &str) -> Option<f32> {
        match name {
            "Intensity" => Some(self.intensity),
            _ => None,
        }
    }

    fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        match name {
            "Intensity" => {
                self.intensity = value;
                true
            }
            _ => false,
        }
    }

    fn color(&self, name: &str) -> Option<ColorValue> {
        match name {
            "LightColor" => Some(ColorValue::Srgb(self.light_color)),
            "LowerHemisphereColor" => Some(ColorValue::Linear(self.lower_hemisphere_color)),
            _ => None,
        }
    }

    fn set_color(&mut self, name: &str, value: ColorValue) -> bool {
        match name {
            "LightColor" => write_srgb(&mut self.light_color, value),
            "LowerHemisphereColor" => write_linear(&mut self.lower_hemisphere_color, value),
            _ => false,
        }
    }
}

// ============================================================================
// Atmosphere
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HeightFog {
    pub fog_density: f32,
    pub fog_height_falloff: f32,
    pub start_distance: f32,
    pub fog_max_opacity: f32,
    pub fog_inscattering_color: LinearColor,
}

impl Default for HeightFog {
    fn default() -> Self {
        Self {
            fog_density: 0.02,
            fog_height_falloff: 0.2,
            start_distance: 0.0,
            fog_max_opacity: 1.0,
            fog_inscattering_color: LinearColor::new(0.447, 0.638, 1.0, 1.0),
        }
    }
}

impl PropertyAccess for HeightFog {
    fn scalar(&self, name: &str) -> Option<f32> {
        match name {
            "FogDensity" => Some(self.fog_density),
            "FogHeightFalloff" => Some(self.fog_height_falloff),
            "StartDistance" => Some(self.start_distance),
            "FogMaxOpacity" => Some(self.fog_max_opacity),
            _ => None,
        }
    }

    fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        let slot = match name {
            "FogDensity" => &mut self.fog_density,
            "FogHeightFalloff" => &mut self.fog_height_falloff,
            "StartDistance" => &mut self.start_distance,
            "FogMaxOpacity" => &mut self.fog_max_opacity,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn color(&self, name: &str) -> Option<ColorValue> {
        match name {
            "FogInscatteringColor" => Some(ColorValue::Linear(self.fog_inscattering_color)),
            _ => None,
        }
    }

    fn set_color(&mut self, name: &str, value: ColorValue) -> bool {
        match name {
            "FogInscatteringColor" => write_linear(&mut self.fog_inscattering_color, value),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostProcess {
    pub exposure_bias: f32,
    pub bloom_intensity: f32,
    pub saturation: f32,
    pub color_tint: LinearColor,
}

impl Default for PostProcess {
    fn default() -> Self {
        Self {
            exposure_bias: 0.0,
            bloom_intensity: 0.675,
            saturation: 1.0,
            color_tint: LinearColor::WHITE,
        }
    }
}

impl PropertyAccess for PostProcess {
    fn scalar(&self, name: &str) -> Option<f32> {
        match name {
            "ExposureBias" => Some(self.exposure_bias),
            "BloomIntensity" => Some(self.bloom_intensity),
            "Saturation" => Some(self.saturation),
            _ => None,
        }
    }

    fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        let slot = match name {
            "ExposureBias" => &mut self.exposure_bias,
            "BloomIntensity" => &mut self.bloom_intensity,
            "Saturation" => &mut self.saturation,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn color(&self, name: &str) -> Option<ColorValue> {
        match name {
            "ColorTint" => Some(ColorValue::Linear(self.color_tint)),
            _ => None,
        }
    }

    fn set_color(&mut self, name: &str, value: ColorValue) -> bool {
        match name {
            "ColorTint" => write_linear(&mut self.color_tint, value),
            _ => false,
        }
    }
}

// ============================================================================
// Generic property bag
// ============================================================================

/// Free-form properties for object kinds without a dedicated struct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyBag {
    scalars: FxHashMap<String, f32>,
    colors: FxHashMap<String, ColorValue>,
}

impl PropertyBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or overwrites) a scalar property.
    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, value: f32) -> Self {
        self.scalars.insert(name.into(), value);
        self
    }

    /// Declares (or overwrites) a color property; the value fixes its format.
    #[must_use]
    pub fn with_color(mut self, name: impl Into<String>, value: ColorValue) -> Self {
        self.colors.insert(name.into(), value);
        self
    }
}

impl PropertyAccess for PropertyBag {
    fn scalar(&self, name: &str) -> Option<f32> {
        self.scalars.get(name).copied()
    }

    fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        match self.scalars.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn color(&self, name: &str) -> Option<ColorValue> {
        self.colors.get(name).copied()
    }

    fn set_color(&mut self, name: &str, value: ColorValue) -> bool {
        match self.colors.get_mut(name) {
            Some(slot) if slot.format() == value.format() => {
                *slot = value;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Tagged dispatch
// ============================================================================

/// The concrete kind of a scene object.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Component {
    /// Transform only (e.g. a plain actor or a scene root).
    #[default]
    Empty,
    DirectionalLight(DirectionalLight),
    SkyLight(SkyLight),
    HeightFog(HeightFog),
    PostProcess(PostProcess),
    Custom(PropertyBag),
}

impl Component {
    #[must_use]
    pub fn as_sky_light(&self) -> Option<&SkyLight> {
        match self {
            Self::SkyLight(sky) => Some(sky),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_sky_light(&self) -> bool {
        matches!(self, Self::SkyLight(_))
    }

    fn properties(&self) -> Option<&dyn PropertyAccess> {
        match self {
            Self::Empty => None,
            Self::DirectionalLight(c) => Some(c),
            Self::SkyLight(c) => Some(c),
            Self::HeightFog(c) => Some(c),
            Self::PostProcess(c) => Some(c),
            Self::Custom(c) => Some(c),
        }
    }

    fn properties_mut(&mut self) -> Option<&mut dyn PropertyAccess> {
        match self {
            Self::Empty => None,
            Self::DirectionalLight(c) => Some(c),
            Self::SkyLight(c) => Some(c),
            Self::HeightFog(c) => Some(c),
            Self::PostProcess(c) => Some(c),
            Self::Custom(c) => Some(c),
        }
    }
}

impl PropertyAccess for Component {
    fn scalar(&self, name: &str) -> Option<f32> {
        self.properties()?.scalar(name)
    }

    fn set_scalar(&mut self, name: &str, value: f32) -> bool {
        self.properties_mut()
            .is_some_and(|p| p.set_scalar(name, value))
    }

    fn color(&self, name: &str) -> Option<ColorValue> {
        self.properties()?.color(name)
    }

    fn set_color(&mut self, name: &str, value: ColorValue) -> bool {
        self.properties_mut()
            .is_some_and(|p| p.set_color(name, value))
    }
}
