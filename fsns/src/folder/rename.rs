//! Renaming items in place.

use std::fs;
use std::path::PathBuf;

use super::display::{should_hide_extension, DisplayFlags};
use super::FsFolder;
use crate::error::{Error, Result};
use crate::pidl::{IdList, Segment};
use crate::probe::{self, map_io_error};
use crate::provider::NamespaceContext;

impl FsFolder {
    /// Rename the item `id` to `new_name` and return its new segment.
    ///
    /// Friendly names (normal or in-folder forms) are relative to this
    /// folder and get the hidden extension re-appended; other forms are
    /// taken as a full destination path.
    ///
    /// # Errors
    ///
    /// Returns an invalid argument error for a complex identifier or an
    /// empty name, and the mapped I/O error if the rename fails.
    pub fn set_name_of(
        &self,
        ctx: &NamespaceContext,
        id: &IdList,
        new_name: &str,
        flags: DisplayFlags,
    ) -> Result<Segment> {
        let root = self.require_root_path()?;
        let segment = match id.segments() {
            [segment] => segment,
            _ => return Err(Error::invalid_argument("only a direct child can be renamed")),
        };
        if new_name.is_empty() {
            return Err(Error::invalid_argument("the new name is empty"));
        }

        let mut name = new_name.to_string();
        if !flags.contains(DisplayFlags::FOR_PARSING)
            && !segment.is_folder()
            && should_hide_extension(ctx, segment.name())?
        {
            name.push_str(segment.extension());
        }

        let relative = flags == DisplayFlags::NORMAL || flags.contains(DisplayFlags::IN_FOLDER);
        let source = root.join(segment.name());
        let dest = if relative {
            root.join(&name)
        } else {
            PathBuf::from(&name)
        };

        if source != dest {
            log::debug!("renaming {} to {}", source.display(), dest.display());
            fs::rename(&source, &dest).map_err(|e| map_io_error(&source, e))?;
        }
        probe::segment_for_path(&dest)
    }
}
