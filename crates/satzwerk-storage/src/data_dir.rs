// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Default storage root resolution.

use std::path::PathBuf;

/// Conventional storage root: `$XDG_DATA_HOME/satzwerk`, then
/// `~/.local/share/satzwerk`, then the system temp directory.
pub fn default_root() -> PathBuf {
    base_dir().join("satzwerk")
}

fn base_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".local").join("share");
    }
    std::env::temp_dir()
}
