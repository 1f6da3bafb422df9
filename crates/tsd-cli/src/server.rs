//! Request loop for `tsd-server`.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_refactor::{Project, RefactorService};

use crate::protocol::{EditsResponse, RefactorsResponse, Request, Response, Selection};

pub struct Server {
    project: Project,
    service: RefactorService,
    requests_handled: u64,
}

impl Server {
    pub fn new(format_settings: FormatCodeSettings) -> Self {
        let mut project = Project::new();
        project.set_format_settings(format_settings);
        Server {
            project,
            service: RefactorService::new(),
            requests_handled: 0,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn requests_handled(&self) -> u64 {
        self.requests_handled
    }

    pub fn handle_request(&mut self, request: Request) -> Response {
        self.requests_handled += 1;
        let id = request.id();
        match request {
            Request::Open { file, text, .. } => match self.open(file, text) {
                Ok(()) => Response::ok(id),
                Err(err) => Response::error(id, format!("{err:#}")),
            },
            Request::Close { file, .. } => match self.project.remove_file(&file) {
                Some(_) => Response::ok(id),
                None => unknown_file(id, &file),
            },
            Request::GetApplicableRefactors {
                file,
                position_or_range,
                ..
            } => {
                let position_or_range = match self.resolve(id, &file, position_or_range) {
                    Ok(position_or_range) => position_or_range,
                    Err(response) => return response,
                };
                let refactors =
                    self.service
                        .get_applicable_refactors(&self.project, &file, position_or_range);
                Response::Refactors(RefactorsResponse { id, refactors })
            }
            Request::GetEditsForRefactor {
                file,
                position_or_range,
                refactor,
                action,
                format_options,
                ..
            } => {
                let position_or_range = match self.resolve(id, &file, position_or_range) {
                    Ok(position_or_range) => position_or_range,
                    Err(response) => return response,
                };
                let edits = self.service.get_edits_for_refactor(
                    &self.project,
                    &file,
                    &format_options,
                    position_or_range,
                    &refactor,
                    &action,
                );
                Response::Edits(EditsResponse { id, edits })
            }
            Request::Configure { format_options, .. } => {
                let merged = self.project.format_settings().merged_with(&format_options);
                debug!(indent_size = merged.indent_size(), "configured formatting");
                self.project.set_format_settings(merged);
                Response::ok(id)
            }
            Request::Shutdown { .. } => Response::ok(id),
        }
    }

    /// Byte offsets for `selection` in `file`, or the error response.
    fn resolve(
        &self,
        id: u64,
        file: &str,
        selection: Selection,
    ) -> std::result::Result<PositionOrRange, Response> {
        let Some(source) = self.project.file(file) else {
            return Err(unknown_file(id, file));
        };
        selection
            .resolve(source.text())
            .ok_or_else(|| Response::error(id, format!("selection outside {file}")))
    }

    fn open(&mut self, file: String, text: Option<String>) -> Result<()> {
        let text = match text {
            Some(text) => text,
            None => std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {file}"))?,
        };
        self.project.set_file(file, text);
        Ok(())
    }

    /// Answer one input line. Returns the response and whether the session
    /// should end; blank lines produce nothing.
    pub fn handle_line(&mut self, line: &str) -> Option<(Response, bool)> {
        if line.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Request>(line) {
            Ok(request) => {
                let is_shutdown = matches!(request, Request::Shutdown { .. });
                Some((self.handle_request(request), is_shutdown))
            }
            Err(err) => {
                warn!(error = %err, "invalid request");
                Some((Response::error(0, format!("invalid request: {err}")), false))
            }
        }
    }

    /// Serve requests from `input` until shutdown or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read request")?;
            let Some((response, is_shutdown)) = self.handle_line(&line) else {
                continue;
            };
            writeln!(output, "{}", serde_json::to_string(&response)?)
                .context("failed to write response")?;
            output.flush()?;

            if is_shutdown {
                info!(requests = self.requests_handled, "shutting down");
                break;
            }
        }
        Ok(())
    }
}

fn unknown_file(id: u64, file: &str) -> Response {
    Response::error(id, format!("unknown file: {file}"))
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
