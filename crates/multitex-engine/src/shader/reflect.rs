use super::ShaderError;

/// Pipeline stage of an entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
    Compute,
}

impl Stage {
    fn from_naga(stage: naga::ShaderStage) -> Option<Self> {
        match stage {
            naga::ShaderStage::Vertex => Some(Self::Vertex),
            naga::ShaderStage::Fragment => Some(Self::Fragment),
            naga::ShaderStage::Compute => Some(Self::Compute),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

/// Bind group + binding index of a named resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ResourceSlot {
    pub group: u32,
    pub binding: u32,
}

#[derive(Debug, Clone)]
struct EntryPointInfo {
    name: String,
    stage: Stage,
    /// `(name, location)` of every located input.
    inputs: Vec<(String, u32)>,
}

/// Name → slot tables extracted from a validated module.
#[derive(Debug, Clone, Default)]
pub struct ShaderReflection {
    entry_points: Vec<EntryPointInfo>,
    resources: Vec<(String, ResourceSlot)>,
}

impl ShaderReflection {
    pub fn from_module(module: &naga::Module) -> Self {
        let entry_points = module
            .entry_points
            .iter()
            .filter_map(|ep| {
                let stage = Stage::from_naga(ep.stage)?;
                Some(EntryPointInfo {
                    name: ep.name.clone(),
                    stage,
                    inputs: located_inputs(module, &ep.function),
                })
            })
            .collect();

        let resources = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| {
                let name = var.name.clone()?;
                let rb = var.binding.as_ref()?;
                Some((
                    name,
                    ResourceSlot {
                        group: rb.group,
                        binding: rb.binding,
                    },
                ))
            })
            .collect();

        Self {
            entry_points,
            resources,
        }
    }

    /// Fails unless an entry point with this stage and name exists.
    pub fn require_entry_point(&self, stage: Stage, name: &str) -> Result<(), ShaderError> {
        if self.find_entry(stage, name).is_some() {
            Ok(())
        } else {
            Err(ShaderError::MissingEntryPoint {
                stage,
                name: name.to_string(),
            })
        }
    }

    /// Location of the vertex input `name` of vertex entry point `entry`.
    pub fn vertex_input(&self, entry: &str, name: &str) -> Result<u32, ShaderError> {
        let ep = self
            .find_entry(Stage::Vertex, entry)
            .ok_or_else(|| ShaderError::MissingEntryPoint {
                stage: Stage::Vertex,
                name: entry.to_string(),
            })?;

        ep.inputs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, loc)| *loc)
            .ok_or_else(|| ShaderError::MissingVertexInput {
                entry: entry.to_string(),
                name: name.to_string(),
            })
    }

    /// Slot of the module-scope resource `name` (texture, sampler, buffer).
    pub fn resource(&self, name: &str) -> Result<ResourceSlot, ShaderError> {
        self.resources
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, slot)| *slot)
            .ok_or_else(|| ShaderError::MissingResource {
                name: name.to_string(),
            })
    }

    fn find_entry(&self, stage: Stage, name: &str) -> Option<&EntryPointInfo> {
        self.entry_points
            .iter()
            .find(|ep| ep.stage == stage && ep.name == name)
    }
}

/// Collects `@location` inputs, looking through struct-typed arguments.
fn located_inputs(module: &naga::Module, function: &naga::Function) -> Vec<(String, u32)> {
    let mut out = Vec::new();

    for arg in &function.arguments {
        match (&arg.binding, &module.types[arg.ty].inner) {
            (Some(naga::Binding::Location { location, .. }), _) => {
                if let Some(name) = &arg.name {
                    out.push((name.clone(), *location));
                }
            }
            (None, naga::TypeInner::Struct { members, .. }) => {
                for member in members {
                    if let (Some(name), Some(naga::Binding::Location { location, .. })) =
                        (&member.name, &member.binding)
                    {
                        out.push((name.clone(), *location));
                    }
                }
            }
            _ => {}
        }
    }

    out
}
