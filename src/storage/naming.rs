// Target-name derivation for rename-on-move
use chrono::Local;

const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Derive the file name an object is moved to.
///
/// Without `stamp` the name passes through unchanged. With `stamp` the
/// current local time is folded in as `<base>_<yyyyMMddHHmmss><ext>`,
/// splitting at the last '.' in the name; a name without an extension gets
/// the stamp appended after the underscore. Two stamped moves of the same
/// file within one second derive the same name and the later copy wins.
pub fn derive_target_name(file_name: &str, stamp: bool) -> String {
    if !stamp {
        return file_name.to_string();
    }

    let ts = Local::now().format(STAMP_FORMAT);
    match file_name.rfind('.') {
        Some(idx) => {
            let (base, ext) = file_name.split_at(idx);
            format!("{base}_{ts}{ext}")
        }
        None => format!("{file_name}_{ts}"),
    }
}
