//! The `protoc` plugin entry point (spec §6). `protoc` invokes this binary
//! with a serialized `CodeGeneratorRequest` as the entire contents of
//! stdin and expects a serialized `CodeGeneratorResponse` as the entire
//! contents of stdout; there is no additional framing on top of that, a
//! `protoc` plugin's stdin/stdout *is* exactly one message each, the way
//! every real plugin in this ecosystem reads and writes it.
//!
//! On any fatal error the diagnostic goes to stderr and the process exits
//! non-zero before anything is written to stdout, so `protoc` never sees a
//! truncated response (spec §7).

use std::io::{self, Read, Write};
use std::process::ExitCode;

use prost::Message;
use prost_types::compiler::{code_generator_response, CodeGeneratorRequest, CodeGeneratorResponse};

use pb_codegen::error::GenError;
use pb_codegen::message_graph::MessageGraph;
use pb_codegen::{default_registry, lower};

fn main() -> ExitCode {
    env_logger::init();

    let mut bytes = Vec::new();
    if let Err(error) = io::stdin().read_to_end(&mut bytes) {
        eprintln!("protoc-gen-wirecodec: failed to read request from stdin: {error}");
        return ExitCode::FAILURE;
    }

    let request = match CodeGeneratorRequest::decode(bytes.as_slice()) {
        Ok(request) => request,
        Err(error) => {
            eprintln!("protoc-gen-wirecodec: malformed CodeGeneratorRequest: {error}");
            return ExitCode::FAILURE;
        }
    };

    let response = match run(&request) {
        Ok(response) => response,
        Err(error) => {
            eprintln!("protoc-gen-wirecodec: {error}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = Vec::new();
    if let Err(error) = response.encode(&mut out) {
        eprintln!("protoc-gen-wirecodec: failed to encode CodeGeneratorResponse: {error}");
        return ExitCode::FAILURE;
    }
    if let Err(error) = io::stdout().write_all(&out) {
        eprintln!("protoc-gen-wirecodec: failed to write response to stdout: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Lowers every file in the request's transitive descriptor set, builds
/// one [`MessageGraph`] over all of them (a recursion cycle can span file
/// boundaries), then runs the full plugin registry over only the files
/// `protoc` actually asked to generate.
fn run(request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse, GenError> {
    let files = request
        .proto_file
        .iter()
        .map(lower::lower_file)
        .collect::<Result<Vec<_>, _>>()?;
    let graph = MessageGraph::new(files.iter());

    let mut registry = default_registry();
    let mut response = CodeGeneratorResponse::default();

    for (proto, file) in request.proto_file.iter().zip(files.iter()) {
        let proto_name = proto.name.as_deref().unwrap_or("");
        if !request.file_to_generate.iter().any(|n| n == proto_name) {
            continue;
        }
        log::debug!("generating {proto_name}");

        for (plugin_name, content) in registry.generate_file(file, &graph)? {
            response.file.push(code_generator_response::File {
                name: Some(output_path(proto_name, plugin_name)),
                content: Some(content),
                ..Default::default()
            });
        }
    }

    Ok(response)
}

/// `foo/bar.proto` generating the `marshal` plugin's output becomes
/// `foo/bar.marshal.rs`, mirroring how every plugin here shares one
/// `.proto` input but writes to its own named output file (spec §4.7).
fn output_path(proto_name: &str, plugin_name: &str) -> String {
    let stem = proto_name.strip_suffix(".proto").unwrap_or(proto_name);
    format!("{stem}.{plugin_name}.rs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_replaces_the_proto_extension() {
        assert_eq!(
            output_path("foo/bar.proto", "marshal"),
            "foo/bar.marshal.rs"
        );
    }

    #[test]
    fn output_path_tolerates_a_missing_extension() {
        assert_eq!(output_path("foo/bar", "accessor"), "foo/bar.accessor.rs");
    }
}
