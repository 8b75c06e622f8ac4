//! Purpose: Hold top-level CLI command dispatch for `wpsexec`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Output envelopes and exit code semantics stay unchanged across commands.
//! Invariants: Decoding goes through `ExecuteDeserializer` with the startup codec.

use super::*;
use crate::execute_json::execute_order_json;
use wpsexec::api::ExecuteDeserializer;
use wpsexec::notice::omitted_input_notice;

pub(super) fn dispatch_command(
    command: Command,
    codec: &JsonCodec,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "wpsexec", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output(codec);
            Ok(RunOutcome::ok())
        }
        Command::Decode {
            file,
            strict,
            pretty,
        } => {
            let document = read_request_document(file.as_deref())?;
            let deserializer = ExecuteDeserializer::new(codec).with_strict(strict);
            let request = deserializer.parse_request(&document)?;
            let order = deserializer.read_execute(&request)?;

            for (index, (input, slot)) in request.inputs.iter().zip(&order.inputs).enumerate() {
                if slot.is_none() {
                    let time = notice_time_now().unwrap_or_default();
                    let notice = omitted_input_notice("decode", &input.id, index, time);
                    emit_notice(codec, &notice, color_mode);
                }
            }

            emit_json(codec, execute_order_json(&order), pretty);
            Ok(RunOutcome::ok())
        }
    }
}
