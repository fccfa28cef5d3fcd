//! Generates the `demokratie` messages and clients from the backend contract.

const PROTO: &str = "proto/demokratie.proto";

const SERDE_DERIVE: &str = "#[derive(serde::Serialize, serde::Deserialize)]";

/// Messages handed to HTTP callers or read from HTTP bodies as JSON.
const JSON_MESSAGES: &[&str] = &[
    ".demokratie.UploadVideoResponse",
    ".demokratie.User",
    ".demokratie.CreateUserRequest",
    ".demokratie.CreateUserResponse",
    ".demokratie.GetUserResponse",
    ".demokratie.UpdateUserResponse",
    ".demokratie.DeleteUserResponse",
    ".demokratie.ListUsersResponse",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the bundled protoc unless the environment provides one.
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    let mut builder = tonic_prost_build::configure()
        .build_server(false)
        .bytes(".demokratie.Chunk.data");

    for message in JSON_MESSAGES {
        builder = builder.type_attribute(message, SERDE_DERIVE);
    }

    builder = builder
        // Field names as the backend's JSON clients spell them (`videoId`).
        .type_attribute(
            ".demokratie.UploadVideoResponse",
            "#[serde(rename_all = \"camelCase\")]",
        )
        // Missing JSON fields become proto3 defaults.
        .type_attribute(".demokratie.CreateUserRequest", "#[serde(default)]");

    builder.compile_protos(&[PROTO], &["proto"])?;
    println!("cargo:rerun-if-changed={PROTO}");
    Ok(())
}
