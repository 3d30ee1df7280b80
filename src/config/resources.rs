/// Shader names and asset paths the water system needs at build and run time.
///
/// Shader names derive from the `Boat Attack/Water` root. The texture paths
/// are default asset names; hosts with a different layout override the fields
/// after [`WaterResources::init`].
#[derive(Debug, Clone, PartialEq)]
pub struct WaterResources {
    pub surface_shader: String,
    pub infinite_sea_shader: String,
    pub caustics_shader: String,
    pub foam_map: String,
    pub surface_normals: String,
    pub dither_noise: String,
}

impl WaterResources {
    pub const SHADER_ROOT: &'static str = "Boat Attack/Water";

    pub fn init() -> Self {
        let resources = Self {
            surface_shader: Self::SHADER_ROOT.to_string(),
            infinite_sea_shader: format!("{}/InfiniteWater", Self::SHADER_ROOT),
            caustics_shader: format!("{}/Caustics", Self::SHADER_ROOT),
            foam_map: "Textures/WaterFoam.png".to_string(),
            surface_normals: "Textures/WaterNormals.png".to_string(),
            dither_noise: "Textures/DitherNoise.png".to_string(),
        };
        tracing::debug!("Water resources initialized: {:?}", resources);
        resources
    }

    pub fn shader_names(&self) -> [&str; 3] {
        [
            self.surface_shader.as_str(),
            self.infinite_sea_shader.as_str(),
            self.caustics_shader.as_str(),
        ]
    }
}
