//! The conversion pipeline.
//!
//! A run moves through `Unopened -> HeaderRead -> LumpsDecoded ->
//! GeometryBuilt -> Written`, one stage at a time and never backwards. The
//! first failing stage puts the run in `Failed` and its error is returned.
//! Calling a step out of order returns [`Error::InvalidState`] and leaves the
//! state as it was, so a pipeline runs at most once.

use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

use bsp_decode::{ContainerHeader, EXPECTED_VERSION, MapGeometry, read_geometry, read_header};

use crate::error::{Error, Result, Stage};
use crate::options::ExportOptions;
use crate::polygon::{SkipReason, build_polygon, skip_reason};
use crate::report::{Reporter, Severity};
use crate::stl::{save_stl, write_stl};
use crate::triangulate::fan;
use crate::{Mesh, MeshStats, Triangle};

/// Where a pipeline run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Unopened,
    HeaderRead,
    LumpsDecoded,
    GeometryBuilt,
    Written,
    /// Terminal; holds the stage that failed.
    Failed(Stage),
}

impl PipelineState {
    const fn next(self) -> Option<Self> {
        match self {
            Self::Unopened => Some(Self::HeaderRead),
            Self::HeaderRead => Some(Self::LumpsDecoded),
            Self::LumpsDecoded => Some(Self::GeometryBuilt),
            Self::GeometryBuilt => Some(Self::Written),
            Self::Written | Self::Failed(_) => None,
        }
    }
}

/// One conversion run.
pub struct Pipeline<P> {
    options: ExportOptions,
    reporter: P,
    state: PipelineState,
}

impl<P: Reporter> Pipeline<P> {
    #[must_use]
    pub const fn new(options: ExportOptions, reporter: P) -> Self {
        Self {
            options,
            reporter,
            state: PipelineState::Unopened,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// Decode `input` and build its triangle mesh.
    ///
    /// Fails with [`Error::EmptyMesh`] when no face produces a triangle, and
    /// with [`Error::InvalidState`] unless the pipeline is still unopened.
    pub fn build_mesh<R: Read + Seek>(&mut self, input: &mut R) -> Result<Mesh> {
        self.require(PipelineState::Unopened, Stage::Header)?;
        let header = read_header(input).map_err(|e| self.fail(Error::decode(Stage::Header, e)))?;
        self.report_header(&header);
        self.advance();

        let geometry =
            read_geometry(input, &header).map_err(|e| self.fail(Error::decode(Stage::Lumps, e)))?;
        self.report_lumps(&geometry);
        self.advance();

        let mesh = self.triangulate(&geometry).map_err(|e| self.fail(e))?;
        if mesh.triangles.is_empty() {
            return Err(self.fail(Error::EmptyMesh {
                faces: mesh.stats.faces,
                skipped: mesh.stats.skipped(),
            }));
        }
        self.advance();
        Ok(mesh)
    }

    /// Serialize `mesh` into `output`; `target` names the sink in messages.
    ///
    /// Requires a mesh built by this pipeline.
    pub fn write_mesh<W: Write>(&mut self, mesh: &Mesh, output: W, target: &str) -> Result<()> {
        self.require(PipelineState::GeometryBuilt, Stage::Write)?;
        self.report_write(mesh, target);
        write_stl(output, &mesh.triangles, &self.options.header_text).map_err(|source| {
            self.fail(Error::WriteFailed {
                target: target.to_string(),
                source,
            })
        })?;
        self.advance();
        Ok(())
    }

    /// Create or truncate `path` and serialize `mesh` into it.
    pub fn save_mesh(&mut self, mesh: &Mesh, path: &Path) -> Result<()> {
        self.require(PipelineState::GeometryBuilt, Stage::Write)?;
        self.report_write(mesh, &path.display().to_string());
        save_stl(path, &mesh.triangles, &self.options.header_text).map_err(|e| self.fail(e))?;
        self.advance();
        Ok(())
    }

    fn triangulate(&mut self, geometry: &MapGeometry) -> Result<Mesh> {
        let total = geometry.faces.len();
        self.reporter.message(
            Severity::Info,
            &format!("Building triangles from {total} faces (displacements skipped)..."),
        );

        let interval = self.options.progress_interval(total);
        let mut stats = MeshStats {
            faces: total,
            ..MeshStats::default()
        };
        let mut triangles = Vec::new();

        for (index, face) in geometry.faces.iter().enumerate() {
            match skip_reason(face) {
                Some(SkipReason::Displacement) => stats.skipped_displacement += 1,
                Some(SkipReason::TooFewEdges) => stats.skipped_degenerate += 1,
                None => {
                    let boundary = build_polygon(index, face, geometry)?;
                    triangles.extend(fan(&boundary).map(|[a, b, c]| Triangle::new(a, b, c)));
                    stats.converted += 1;
                }
            }

            if index % interval == 0 || index + 1 == total {
                self.reporter.progress(index + 1, total);
            }
        }

        stats.triangles = triangles.len();
        self.reporter.message(
            Severity::Info,
            &format!("Generated {} triangles.", stats.triangles),
        );
        self.reporter.message(
            Severity::Debug,
            &format!(
                "{} faces converted, {} displacement and {} degenerate faces skipped",
                stats.converted, stats.skipped_displacement, stats.skipped_degenerate
            ),
        );
        Ok(Mesh { triangles, stats })
    }

    fn report_header(&mut self, header: &ContainerHeader) {
        self.reporter.message(
            Severity::Info,
            &format!(
                "Read BSP header: ident={}, version={}, revision={}",
                header.ident_str(),
                header.version,
                header.revision
            ),
        );
        if !header.has_expected_version() {
            self.reporter.message(
                Severity::Warning,
                &format!(
                    "BSP version {} (expected {EXPECTED_VERSION}). Conversion may still work but is not guaranteed.",
                    header.version
                ),
            );
        }
    }

    fn report_lumps(&mut self, geometry: &MapGeometry) {
        for (name, count) in [
            ("vertices", geometry.vertices.len()),
            ("edges", geometry.edges.len()),
            ("surfedges", geometry.surfedges.len()),
            ("faces", geometry.faces.len()),
        ] {
            self.reporter
                .message(Severity::Info, &format!("Read {count} {name}"));
        }
    }

    fn report_write(&mut self, mesh: &Mesh, target: &str) {
        self.reporter.message(
            Severity::Info,
            &format!(
                "Writing STL with {} triangles to {target}",
                mesh.triangles.len()
            ),
        );
    }

    fn require(&self, expected: PipelineState, stage: Stage) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                stage,
                expected,
                found: self.state,
            })
        }
    }

    /// Move one step forward. Callers have already checked the prior state.
    fn advance(&mut self) {
        if let Some(to) = self.state.next() {
            tracing::debug!(from = ?self.state, ?to, "pipeline stage complete");
            self.state = to;
        }
    }

    fn fail(&mut self, error: Error) -> Error {
        let stage = error.stage();
        self.state = PipelineState::Failed(stage);
        self.reporter.message(Severity::Error, &error.to_string());
        error
    }
}

/// Convert a container read from `input` into STL written to `output`.
pub fn convert_reader<R, W, P>(
    input: &mut R,
    output: W,
    options: ExportOptions,
    reporter: P,
) -> Result<MeshStats>
where
    R: Read + Seek,
    W: Write,
    P: Reporter,
{
    let mut pipeline = Pipeline::new(options, reporter);
    let mesh = pipeline.build_mesh(input)?;
    pipeline.write_mesh(&mesh, output, "output stream")?;
    Ok(mesh.stats)
}

/// Convert the map at `input` into an STL file at `output`.
///
/// The output file is only created once the mesh has been built, so a failed
/// decode leaves nothing behind.
pub fn convert_file<P: Reporter>(
    input: &Path,
    output: &Path,
    options: ExportOptions,
    reporter: P,
) -> Result<MeshStats> {
    let mut pipeline = Pipeline::new(options, reporter);
    let file = File::open(input).map_err(|source| {
        pipeline.fail(Error::OpenFailed {
            path: input.to_path_buf(),
            source,
        })
    })?;

    let mesh = pipeline.build_mesh(&mut BufReader::new(file))?;
    pipeline.save_mesh(&mesh, output)?;
    pipeline.reporter.message(
        Severity::Info,
        &format!(
            "Wrote STL with {} triangles to: {}",
            mesh.stats.triangles,
            output.display()
        ),
    );
    Ok(mesh.stats)
}
