// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// LibreOffice bridge — runs `soffice --headless --convert-to pdf` in a private
// scratch directory with a hard time limit.
//
// Each call gets its own output directory and its own LibreOffice user
// profile, so concurrent conversions never contend for the profile lock or
// see each other's files.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use satzwerk_core::error::{Result, SatzwerkError};
use tracing::{debug, info, instrument, warn};

use crate::traits::NativeConverter;

/// Interval between child-process status polls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Native converter backed by a LibreOffice installation.
pub struct SofficeConverter {
    program: PathBuf,
    timeout: Duration,
}

impl SofficeConverter {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Find an executable `program` on `PATH` (or accept it directly when it
    /// is a path).
    pub fn locate(program: &str, timeout: Duration) -> Option<Self> {
        match which::which(program) {
            Ok(path) => Some(Self::new(path, timeout)),
            Err(e) => {
                debug!(program, error = %e, "native converter not found");
                None
            }
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl NativeConverter for SofficeConverter {
    fn name(&self) -> &str {
        "LibreOffice (soffice)"
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    #[instrument(skip(self), fields(program = %self.program.display()))]
    fn try_convert(&self, input: &Path, output: &Path) -> Result<()> {
        let scratch = tempfile::tempdir()?;
        let out_dir = scratch.path().join("out");
        let profile_dir = scratch.path().join("profile");
        std::fs::create_dir_all(&out_dir)?;
        std::fs::create_dir_all(&profile_dir)?;

        info!(input = %input.display(), "starting native conversion");

        let child = Command::new(&self.program)
            .arg("--headless")
            .arg("--norestore")
            .arg(format!("-env:UserInstallation=file://{}", profile_dir.display()))
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(&out_dir)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                SatzwerkError::NativeConversion(format!(
                    "failed to start {}: {e}",
                    self.program.display()
                ))
            })?;

        let status = wait_with_timeout(child, self.timeout)?;
        if !status.success() {
            return Err(SatzwerkError::NativeConversion(format!(
                "converter exited with {status}"
            )));
        }

        let stem = input
            .file_stem()
            .ok_or_else(|| SatzwerkError::NativeConversion("input has no file name".into()))?;
        let produced = out_dir.join(format!("{}.pdf", stem.to_string_lossy()));
        if !produced.is_file() {
            return Err(SatzwerkError::NativeConversion(format!(
                "converter produced no output at {}",
                produced.display()
            )));
        }

        // The scratch dir may sit on another filesystem, so copy rather than rename.
        let bytes = std::fs::copy(&produced, output)?;
        debug!(output = %output.display(), bytes, "native output copied");
        Ok(())
    }
}

/// Wait for `child`, killing it once `timeout` has elapsed.
fn wait_with_timeout(mut child: Child, timeout: Duration) -> Result<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            warn!(timeout_secs = timeout.as_secs(), "native converter timed out, killing it");
            // Already exited between the poll and the kill is fine.
            let _ = child.kill();
            let _ = child.wait();
            return Err(SatzwerkError::NativeTimeout {
                secs: timeout.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
