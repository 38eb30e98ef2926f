//! FGD output for parsed entity definitions.

mod fgd;
mod key_type;

pub use fgd::{format_number, write_fgd, FgdWriter, RenderOptions};
pub use key_type::{infer_key_type, KeyMatch, KeyType, KEY_TYPE_RULES};
