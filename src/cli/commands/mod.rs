//! `qrsa` subcommands.

pub mod create;
pub mod sign;
pub mod signqr;
pub mod verify;
pub mod verifyqr;

use super::args::Command;

pub fn dispatch(cmd: Command) -> i32 {
    match cmd {
        Command::Create(args) => create::cmd_create(args),
        Command::Sign(args) => sign::cmd_sign(args),
        Command::Verify(args) => verify::cmd_verify(args),
        Command::Signqr(args) => signqr::cmd_signqr(args),
        Command::Verifyqr(args) => verifyqr::cmd_verifyqr(args),
    }
}
