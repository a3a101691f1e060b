use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use super::scan;
use super::ShaderError;

/// Pipeline stage an entry point belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

impl ShaderStage {
    pub(crate) fn from_attribute(attr: &str) -> Option<Self> {
        match attr {
            "vertex" => Some(Self::Vertex),
            "fragment" => Some(Self::Fragment),
            "compute" => Some(Self::Compute),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Compute => "compute",
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct EntryPoint {
    pub stage: ShaderStage,
    pub name: String,
}

/// A WGSL source together with the entry points it declares.
#[derive(Debug, Clone)]
pub struct ShaderLibrary {
    label: String,
    source: Cow<'static, str>,
    entry_points: Vec<EntryPoint>,
}

impl ShaderLibrary {
    /// Builds a library from WGSL text.
    pub fn from_wgsl(
        label: impl Into<String>,
        source: impl Into<Cow<'static, str>>,
    ) -> Result<Self, ShaderError> {
        let label = label.into();
        let source = source.into();
        let entry_points = scan::entry_points(&source).map_err(|e| {
            ShaderError::UnterminatedComment {
                library: label.clone(),
                line: e.line,
            }
        })?;

        log::debug!(
            "shader library `{}`: {} entry point(s)",
            label,
            entry_points.len()
        );

        Ok(Self {
            label,
            source,
            entry_points,
        })
    }

    /// Reads a WGSL file from disk. The file name becomes the label.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_wgsl(path.display().to_string(), source)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn has_entry_point(&self, stage: ShaderStage, name: &str) -> bool {
        self.entry_points
            .iter()
            .any(|e| e.stage == stage && e.name == name)
    }

    /// Returns `name` if the library declares it for `stage`.
    pub fn require<'n>(&self, stage: ShaderStage, name: &'n str) -> Result<&'n str, ShaderError> {
        if self.has_entry_point(stage, name) {
            Ok(name)
        } else {
            Err(ShaderError::MissingEntryPoint {
                library: self.label.clone(),
                stage,
                name: name.to_string(),
            })
        }
    }

    /// Creates the wgpu shader module for this library.
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Wgsl(self.source.clone()),
        })
    }
}
