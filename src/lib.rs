//! The `gsm0338` library converts between text and the compact user-data formats carried by
//! SMS and USSD messages: the [GSM 03.38](https://en.wikipedia.org/wiki/GSM_03.38) 7-bit
//! alphabet, and the GSM 03.40 septet packing that squeezes eight 7-bit characters into seven
//! octets.
//!
//! The usual outbound chain is
//!
//! - `gsm_encoding::gsm_encode`, turning text into unpacked septets,
//! - `pack::pack_8bits_to_7bits`, packing those septets (optionally behind a User Data Header)
//!   into the hex form used in PDUs,
//!
//! and inbound messages go through `pack::unpack_msg` and `gsm_encoding::gsm_decode`. The
//! `user_data` module wraps both directions into one call, choosing UCS-2 when the text can't be
//! represented in the 7-bit alphabet.
//!
//! Everything here is a pure function over in-memory buffers; there is no I/O apart from the
//! stream adapters in `gsm_encoding`, which wrap any `Read`/`Write` you give them.

#[macro_use] extern crate log;
#[macro_use] extern crate failure_derive;
#[macro_use] extern crate nom;
#[macro_use] extern crate derive_is_enum_variant;
#[macro_use] extern crate num_derive;

pub use crate::errors::{GsmError, GsmResult};

macro_rules! check_offset {
    ($b:ident, $offset:ident, $reason:expr) => {
        if $b.get($offset).is_none() {
            return Err(GsmError::InvalidHeader(concat!("Offset check failed for: ", $reason)));
        }
    }
}

pub mod errors;
pub mod gsm_encoding;
pub mod pack;
pub mod user_data;
pub mod validity;
