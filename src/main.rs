use mdconvert::converter;
use mdconvert::error::FAILURE_CODE;
use std::process::ExitCode;

fn main() -> ExitCode {
    let code = converter::run(std::env::args_os());
    ExitCode::from(u8::try_from(code).unwrap_or(FAILURE_CODE as u8))
}
