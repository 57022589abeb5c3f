// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

//! Storage Modul for the track viewer
//!
//! Provides the file stores the GPX files are uploaded to: a directory on the
//! local file system and a client for a remote uploads server.

mod fs_store;
mod http_store;

pub use fs_store::FilesSystemStore;
pub use http_store::HttpFileStore;

use module_core::StoreError;

/// Checks that `name` is a plain GPX file name.
///
/// Accepted are non-empty names ending in `.gpx` (in any case) that contain
/// no path separator and do not refer to a parent directory.
pub fn check_file_name(name: &str) -> Result<(), StoreError> {
    let is_plain = !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != "."
        && name != ".."
        && !name.starts_with("..");
    if is_plain && name.to_lowercase().ends_with(".gpx") && name.len() > ".gpx".len() {
        return Ok(());
    }
    Err(StoreError::InvalidName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::check_file_name;
    use module_core::StoreError;

    #[test]
    fn accepts_gpx_names() {
        assert_eq!(check_file_name("ride.gpx"), Ok(()));
        assert_eq!(check_file_name("Morning Ride.GPX"), Ok(()));
    }

    #[test]
    fn rejects_other_names() {
        for name in ["", ".gpx", "ride.txt", "ride", "../ride.gpx", "a/ride.gpx", "a\\ride.gpx"] {
            assert_eq!(
                check_file_name(name),
                Err(StoreError::InvalidName(name.to_string())),
                "{name}"
            );
        }
    }
}
