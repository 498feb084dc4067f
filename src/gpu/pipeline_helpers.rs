//! Shared wgpu boilerplate: bind group layout entries, samplers, and render
//! pipeline construction.

/// Fragment-visible, filterable float 2D texture binding.
pub fn texture_2d(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

/// Fragment-visible filtering sampler binding.
pub fn filtering_sampler(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Uniform buffer binding visible to `visibility`.
pub fn uniform_buffer(
    binding: u32,
    visibility: wgpu::ShaderStages,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Layout for `count` filterable textures at bindings `0..count` followed
/// by one filtering sampler at binding `count`.
pub fn textures_with_sampler_layout(
    device: &wgpu::Device,
    label: &str,
    count: u32,
) -> wgpu::BindGroupLayout {
    let entries: Vec<_> = (0..count)
        .map(texture_2d)
        .chain(std::iter::once(filtering_sampler(count)))
        .collect();
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Layout")),
        entries: &entries,
    })
}

/// Bind group matching [`textures_with_sampler_layout`].
pub fn textures_with_sampler_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    views: &[&wgpu::TextureView],
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let mut entries: Vec<_> = views
        .iter()
        .zip(0u32..)
        .map(|(view, binding)| wgpu::BindGroupEntry {
            binding,
            resource: wgpu::BindingResource::TextureView(view),
        })
        .collect();
    entries.push(wgpu::BindGroupEntry {
        binding: views.len() as u32,
        resource: wgpu::BindingResource::Sampler(sampler),
    });
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout,
        entries: &entries,
    })
}

/// ClampToEdge + Linear sampler, for render targets.
pub fn linear_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// Repeat + Linear sampler, for image textures.
pub fn repeat_sampler(device: &wgpu::Device, label: &str) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// Color blending for premultiplied-alpha output.
pub const PREMULTIPLIED_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Everything that varies between the render pipelines in this crate.
pub struct PipelineDesc<'a> {
    /// Debug label prefix.
    pub label: &'a str,
    /// Shader module holding both entry points.
    pub shader: &'a wgpu::ShaderModule,
    /// Vertex entry point.
    pub vs_entry: &'a str,
    /// Fragment entry point.
    pub fs_entry: &'a str,
    /// Vertex buffer layouts, by slot.
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
    /// Bind group layouts, by group index.
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    /// Color target format.
    pub format: wgpu::TextureFormat,
    /// Color blending, `None` to replace.
    pub blend: Option<wgpu::BlendState>,
    /// Primitive topology.
    pub topology: wgpu::PrimitiveTopology,
    /// Whether the pass has a [`DepthTexture`](super::texture::DepthTexture)
    /// attachment (less-than test with writes).
    pub depth: bool,
}

impl<'a> PipelineDesc<'a> {
    /// Triangle-list pipeline with `vs_main` / `fs_main`, no blending, and
    /// no depth.
    pub fn new(
        label: &'a str,
        shader: &'a wgpu::ShaderModule,
        format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            label,
            shader,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
            vertex_layouts: &[],
            bind_group_layouts: &[],
            format,
            blend: None,
            topology: wgpu::PrimitiveTopology::TriangleList,
            depth: false,
        }
    }
}

/// Create a render pipeline with a single color target and no culling.
pub fn create_render_pipeline(
    device: &wgpu::Device,
    desc: &PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", desc.label)),
            bind_group_layouts: desc.bind_group_layouts,
            push_constant_ranges: &[],
        });

    let depth_stencil = desc.depth.then(|| wgpu::DepthStencilState {
        format: super::texture::DepthTexture::FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} Pipeline", desc.label)),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some(desc.vs_entry),
            buffers: desc.vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some(desc.fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            ..Default::default()
        },
        depth_stencil,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
