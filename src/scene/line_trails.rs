//! Orbiting line segments that leave fading trails.
//!
//! Every frame draws into a persistent off-screen target: first a
//! full-screen quad with opacity `opacity` darkens what is already there,
//! then the lines are drawn at their current phase. The target is then
//! copied to the surface, discarding texels dimmer than `floor`.

use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::geometry::{
    ScreenUvVertex, ScreenVertex, FULLSCREEN_STRIP, FULLSCREEN_UV_STRIP,
};
use super::{begin_pass, Frame, Scene, SceneInit};
use crate::camera::Camera;
use crate::error::GlearnError;
use crate::gpu::mesh::{Mesh, Vertex};
use crate::gpu::pipeline_helpers::{
    create_render_pipeline, linear_sampler, textures_with_sampler_bind_group,
    textures_with_sampler_layout, PipelineDesc, PREMULTIPLIED_BLEND,
};
use crate::gpu::shaders;
use crate::gpu::texture::RenderTarget;
use crate::gpu::uniform::UniformBuffer;
use crate::input::KeyAction;
use crate::options::TrailOptions;

/// Texel format of the trail target.
const TRAIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
/// Phase lead of each line's second endpoint, per unit of speed.
const SEGMENT_PHASE: f32 = 0.1;
/// Step applied by the opacity and floor keys.
const FINE_STEP: f32 = 0.01;

/// One endpoint of an orbiting line.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// Orbit center in clip space (before aspect correction).
    pub center: [f32; 2],
    /// Orbit radius.
    pub radius: f32,
    /// Phase offset in radians.
    pub offset: f32,
}

impl Vertex for LineVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32,
        2 => Float32
    ];
}

/// Random lines, two vertices each.
///
/// Centers are uniform in `[-0.5, 0.5)^2`, radii in
/// `[min_radius, max_radius)` (exactly `min_radius` when the range is
/// empty), and phase offsets in `[0, π)`. The second vertex of each line
/// shares the first's center and radius and leads it by
/// `0.1 * speed` radians.
pub fn generate_lines<R: Rng + ?Sized>(
    options: &TrailOptions,
    rng: &mut R,
) -> Vec<LineVertex> {
    let lead = SEGMENT_PHASE * options.speed;
    (0..options.line_count)
        .flat_map(|_| {
            let center = [rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5)];
            let radius = if options.max_radius > options.min_radius {
                rng.random_range(options.min_radius..options.max_radius)
            } else {
                options.min_radius
            };
            let offset = rng.random_range(0.0..PI);
            [
                LineVertex {
                    center,
                    radius,
                    offset,
                },
                LineVertex {
                    center,
                    radius,
                    offset: offset + lead,
                },
            ]
        })
        .collect()
}

/// Advance the orbit phase by `dt * speed`, wrapped into `[0, 2π)`.
#[must_use]
pub fn advance_phase(phase: f32, dt: f32, speed: f32) -> f32 {
    (phase + dt.max(0.0) * speed).rem_euclid(TAU)
}

/// The key-tunable trail parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailParams {
    /// Angular speed multiplier.
    pub speed: f32,
    /// Fade-quad opacity, in `[0, 1]`.
    pub opacity: f32,
    /// Composite brightness floor.
    pub floor: f32,
}

impl TrailParams {
    /// Parameters from options, with opacity clamped.
    #[must_use]
    pub fn from_options(options: &TrailOptions) -> Self {
        Self {
            speed: options.speed,
            opacity: options.opacity.clamp(0.0, 1.0),
            floor: options.floor,
        }
    }

    /// Apply a tuning key. Returns whether `action` was a trail action.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::IncreaseOpacity => {
                self.opacity = (self.opacity + FINE_STEP).min(1.0);
            }
            KeyAction::DecreaseOpacity => {
                self.opacity = (self.opacity - FINE_STEP).max(0.0);
            }
            KeyAction::IncreaseSpeed => self.speed += 1.0,
            KeyAction::DecreaseSpeed => self.speed -= 1.0,
            KeyAction::RaiseFloor => self.floor += FINE_STEP,
            KeyAction::LowerFloor => self.floor -= FINE_STEP,
            _ => return false,
        }
        true
    }
}

/// One float padded to 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ScalarUniform {
    value: f32,
    _pad: [f32; 3],
}

impl ScalarUniform {
    fn new(value: f32) -> Self {
        Self {
            value,
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct TrailUniform {
    time: f32,
    aspect_ratio: f32,
    _pad: [f32; 2],
}

/// Line trails rendered through an off-screen target.
pub struct LineTrailsScene {
    fade_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,

    fade_quad: Mesh,
    screen_quad: Mesh,
    lines: Mesh,

    fade: UniformBuffer<ScalarUniform>,
    trail: UniformBuffer<TrailUniform>,
    floor: UniformBuffer<ScalarUniform>,

    target: RenderTarget,
    target_layout: wgpu::BindGroupLayout,
    target_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,

    params: TrailParams,
    phase: f32,
    aspect: f32,
}

impl LineTrailsScene {
    /// Generate the lines and build the three pipelines and the target.
    ///
    /// # Errors
    ///
    /// Returns [`GlearnError::Shader`] if a shader fails to compose.
    pub fn new(init: &mut SceneInit<'_>) -> Result<Self, GlearnError> {
        let context = init.context;
        let device = &context.device;
        let options = init.options;
        let trail_options = &options.trails;
        let params = TrailParams::from_options(trail_options);

        let mut rng = match trail_options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        let line_vertices = generate_lines(trail_options, &mut rng);
        log::debug!("generated {} trail lines", line_vertices.len() / 2);

        let fade_shader = init.shaders.load(device, &shaders::FADE)?;
        let line_shader = init.shaders.load(device, &shaders::LINE_TRAIL)?;
        let composite_shader =
            init.shaders.load(device, &shaders::TRAIL_COMPOSITE)?;

        let (width, height) = (context.width(), context.height());
        let aspect = width.max(1) as f32 / height.max(1) as f32;

        let fade = UniformBuffer::new(
            device,
            "Trail Fade",
            &ScalarUniform::new(params.opacity),
            wgpu::ShaderStages::FRAGMENT,
        );
        let trail = UniformBuffer::new(
            device,
            "Trail Lines",
            &TrailUniform {
                time: 0.0,
                aspect_ratio: aspect,
                _pad: [0.0; 2],
            },
            wgpu::ShaderStages::VERTEX,
        );
        let floor = UniformBuffer::new(
            device,
            "Trail Floor",
            &ScalarUniform::new(params.floor),
            wgpu::ShaderStages::FRAGMENT,
        );

        let target = RenderTarget::new(device, width, height, TRAIL_FORMAT);
        let target_layout = textures_with_sampler_layout(device, "Trail Target", 1);
        let sampler = linear_sampler(device, "Trail Sampler");
        let target_bind_group = textures_with_sampler_bind_group(
            device,
            "Trail Target",
            &target_layout,
            &[&target.view],
            &sampler,
        );

        let fade_pipeline = create_render_pipeline(
            device,
            &PipelineDesc {
                vertex_layouts: &[ScreenVertex::layout()],
                bind_group_layouts: &[fade.layout()],
                blend: Some(PREMULTIPLIED_BLEND),
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..PipelineDesc::new("Trail Fade", &fade_shader, TRAIL_FORMAT)
            },
        );
        let line_pipeline = create_render_pipeline(
            device,
            &PipelineDesc {
                vertex_layouts: &[LineVertex::layout()],
                bind_group_layouts: &[trail.layout()],
                blend: Some(PREMULTIPLIED_BLEND),
                topology: wgpu::PrimitiveTopology::LineList,
                ..PipelineDesc::new("Trail Lines", &line_shader, TRAIL_FORMAT)
            },
        );
        let composite_pipeline = create_render_pipeline(
            device,
            &PipelineDesc {
                vertex_layouts: &[ScreenUvVertex::layout()],
                bind_group_layouts: &[&target_layout, floor.layout()],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..PipelineDesc::new(
                    "Trail Composite",
                    &composite_shader,
                    context.format(),
                )
            },
        );

        Ok(Self {
            fade_pipeline,
            line_pipeline,
            composite_pipeline,
            fade_quad: Mesh::new(device, "Fade Quad", &FULLSCREEN_STRIP, None),
            screen_quad: Mesh::new(
                device,
                "Composite Quad",
                &FULLSCREEN_UV_STRIP,
                None,
            ),
            lines: Mesh::new(device, "Trail Lines", &line_vertices, None),
            fade,
            trail,
            floor,
            target,
            target_layout,
            target_bind_group,
            sampler,
            params,
            phase: 0.0,
            aspect,
        })
    }
}

impl Scene for LineTrailsScene {
    fn update(&mut self, queue: &wgpu::Queue, _camera: &Camera, dt: f32) {
        self.phase = advance_phase(self.phase, dt, self.params.speed);
        self.trail.write(
            queue,
            &TrailUniform {
                time: self.phase,
                aspect_ratio: self.aspect,
                _pad: [0.0; 2],
            },
        );
        self.fade.write(queue, &ScalarUniform::new(self.params.opacity));
        self.floor.write(queue, &ScalarUniform::new(self.params.floor));
    }

    fn render(&self, frame: &mut Frame<'_>) {
        {
            let mut pass = begin_pass(
                frame.encoder,
                "Trail Pass",
                &self.target.view,
                wgpu::LoadOp::Load,
                None,
            );
            pass.set_pipeline(&self.fade_pipeline);
            pass.set_bind_group(0, self.fade.bind_group(), &[]);
            self.fade_quad.draw(&mut pass);

            pass.set_pipeline(&self.line_pipeline);
            pass.set_bind_group(0, self.trail.bind_group(), &[]);
            self.lines.draw(&mut pass);
        }

        let mut pass = begin_pass(
            frame.encoder,
            "Trail Composite Pass",
            frame.target,
            wgpu::LoadOp::Clear(wgpu::Color::BLACK),
            None,
        );
        pass.set_pipeline(&self.composite_pipeline);
        pass.set_bind_group(0, &self.target_bind_group, &[]);
        pass.set_bind_group(1, self.floor.bind_group(), &[]);
        self.screen_quad.draw(&mut pass);
    }

    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.target.resize(device, width, height);
        self.target_bind_group = textures_with_sampler_bind_group(
            device,
            "Trail Target",
            &self.target_layout,
            &[&self.target.view],
            &self.sampler,
        );
    }

    fn handle_action(&mut self, action: KeyAction) {
        if self.params.apply(action) {
            log::info!(
                "trails: speed {} opacity {:.2} floor {:.2}",
                self.params.speed,
                self.params.opacity,
                self.params.floor
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn two_vertices_per_line() {
        let options = TrailOptions::default();
        let lines = generate_lines(&options, &mut seeded());
        assert_eq!(lines.len(), 2 * options.line_count as usize);
    }

    #[test]
    fn generated_values_stay_in_range() {
        let options = TrailOptions {
            line_count: 500,
            ..TrailOptions::default()
        };
        for v in generate_lines(&options, &mut seeded()).chunks(2).map(|p| p[0]) {
            assert!(v.center.iter().all(|c| (-0.5..0.5).contains(c)));
            assert!((options.min_radius..options.max_radius).contains(&v.radius));
            assert!((0.0..PI).contains(&v.offset));
        }
    }

    #[test]
    fn second_vertex_leads_by_speed() {
        let options = TrailOptions {
            speed: 3.0,
            ..TrailOptions::default()
        };
        for pair in generate_lines(&options, &mut seeded()).chunks(2) {
            assert_eq!(pair[0].center, pair[1].center);
            assert_eq!(pair[0].radius, pair[1].radius);
            assert!((pair[1].offset - pair[0].offset - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_line_count_from_toml_still_draws_a_line() {
        let options = crate::options::Options::from_toml("[trails]\nline_count = 0\n")
            .unwrap()
            .trails;
        assert_eq!(generate_lines(&options, &mut seeded()).len(), 2);
    }

    #[test]
    fn empty_radius_range_uses_min() {
        let options = TrailOptions {
            min_radius: 0.4,
            max_radius: 0.4,
            ..TrailOptions::default()
        };
        let lines = generate_lines(&options, &mut seeded());
        assert!(lines.iter().all(|v| v.radius == 0.4));
    }

    #[test]
    fn same_seed_same_lines() {
        let options = TrailOptions::default();
        assert_eq!(
            generate_lines(&options, &mut seeded()),
            generate_lines(&options, &mut seeded())
        );
    }

    #[test]
    fn phase_wraps() {
        let phase = advance_phase(6.0, 1.0, 1.0);
        assert!((phase - (7.0 - TAU)).abs() < 1e-5);
        let backwards = advance_phase(0.5, 1.0, -1.0);
        assert!((backwards - (TAU - 0.5)).abs() < 1e-5);
        assert_eq!(advance_phase(1.0, -1.0, 2.0), 1.0);
    }

    #[test]
    fn opacity_is_clamped() {
        let mut params = TrailParams {
            speed: 1.0,
            opacity: 0.995,
            floor: 0.1,
        };
        assert!(params.apply(KeyAction::IncreaseOpacity));
        assert_eq!(params.opacity, 1.0);
        params.opacity = 0.005;
        assert!(params.apply(KeyAction::DecreaseOpacity));
        assert_eq!(params.opacity, 0.0);
    }

    #[test]
    fn speed_and_floor_steps() {
        let mut params = TrailParams::from_options(&TrailOptions::default());
        assert!(params.apply(KeyAction::IncreaseSpeed));
        assert!(params.apply(KeyAction::IncreaseSpeed));
        assert!(params.apply(KeyAction::DecreaseSpeed));
        assert_eq!(params.speed, 2.0);
        assert!(params.apply(KeyAction::RaiseFloor));
        assert!((params.floor - 0.11).abs() < 1e-6);
        assert!(params.apply(KeyAction::LowerFloor));
        assert!(params.apply(KeyAction::LowerFloor));
        assert!((params.floor - 0.09).abs() < 1e-6);
    }

    #[test]
    fn other_actions_are_ignored() {
        let mut params = TrailParams::from_options(&TrailOptions::default());
        let before = params;
        assert!(!params.apply(KeyAction::ToggleShading));
        assert!(!params.apply(KeyAction::MoveForward));
        assert_eq!(params, before);
    }
}
