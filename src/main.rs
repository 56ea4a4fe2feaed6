#[macro_use] extern crate log;
extern crate env_logger;

use gsm0338::user_data::{self, MessageEncoding};
use gsm0338::pack;
use std::io::prelude::*;

fn main() {
    env_logger::init().unwrap();
    println!("Input text to encode, or 'decode [hex]' / 'septets [hex]'");
    let stdin = ::std::io::stdin();
    let lock = stdin.lock();
    for ln in lock.lines() {
        let ln = ln.unwrap();
        if ln.starts_with("decode ") {
            let hex = ln["decode ".len()..].trim();
            match user_data::decode_user_data(hex, MessageEncoding::Gsm7Bit, false) {
                Ok(msg) => println!("Text: {}", msg.text),
                Err(e) => println!("Decode failed: {}", e)
            }
            continue;
        }
        if ln.starts_with("septets ") {
            let hex = ln["septets ".len()..].trim();
            println!("Septets: {:?}", pack::unpack_msg(hex));
            continue;
        }
        match user_data::encode_user_data(&ln, None) {
            Ok((enc, hex)) => {
                debug!("{} hex digits", hex.len());
                println!("{:?}: {}", enc, hex);
            },
            Err(e) => println!("Encode failed: {}", e)
        }
    }
}
