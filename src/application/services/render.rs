//! Graphviz rendering service
//!
//! Writes a tree's edges as a DOT file and hands it to the configured
//! renderer (`dot` by default) to produce an image next to it:
//! `tree.dot` becomes `tree.<image_format>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::report::dot_source;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::BalancedTree;
use crate::infrastructure::traits::{CommandRunner, FileSystem};

/// Files produced by [`RenderService::visualize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub dot_path: PathBuf,
    pub image_path: PathBuf,
}

/// Graph rendering service.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
        settings: Arc<Settings>,
    ) -> Self {
        Self { fs, cmd, settings }
    }

    /// Image path for a DOT file: same stem, configured image format as extension.
    pub fn image_path(&self, dot_path: &Path) -> PathBuf {
        dot_path.with_extension(&self.settings.render.image_format)
    }

    /// Write the tree's DOT source to `path`, creating parent directories.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn write_dot(&self, tree: &BalancedTree, path: &Path) -> ApplicationResult<PathBuf> {
        let source = dot_source(tree, &self.settings.render.graph_name);
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &source)
            .with_path_context("write dot file", path)?;
        debug!("Wrote {} bytes to {}", source.len(), path.display());
        Ok(path.to_path_buf())
    }

    /// Run the renderer on an existing DOT file and return the image path.
    ///
    /// # Errors
    /// - `OperationFailed` if the renderer cannot be started
    /// - `RenderFailed` if it exits with a non-zero status
    #[instrument(level = "debug", skip(self))]
    pub fn render_image(&self, dot_path: &Path) -> ApplicationResult<PathBuf> {
        let render = &self.settings.render;
        let image_path = self.image_path(dot_path);

        let format_arg = format!("-T{}", render.image_format);
        let dot_arg = dot_path.to_string_lossy();
        let image_arg = image_path.to_string_lossy();
        let args = [format_arg.as_str(), &*dot_arg, "-o", &*image_arg];
        let command = format!("{} {}", render.dot_command, args.join(" "));
        debug!("Running: {}", command);

        let output = self
            .cmd
            .run(&render.dot_command, &args)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("run {}", render.dot_command),
                source: Box::new(e),
            })?;

        if !output.status.success() {
            return Err(ApplicationError::RenderFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("Rendered {}", image_path.display());
        Ok(image_path)
    }

    /// Write the DOT file and render it.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn visualize(&self, tree: &BalancedTree, dot_path: &Path) -> ApplicationResult<RenderOutput> {
        let dot_path = self.write_dot(tree, dot_path)?;
        let image_path = self.render_image(&dot_path)?;
        Ok(RenderOutput {
            dot_path,
            image_path,
        })
    }
}
