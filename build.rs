use std::env;
use std::path::PathBuf;

fn main() -> std::io::Result<()> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::NotFound, format!("CARGO_MANIFEST_DIR: {}", e))
    })?);
    let proto_dir = manifest_dir.join("proto");

    let keysign_proto = proto_dir.join("keysign_message.proto");
    if !keysign_proto.exists() {
        eprintln!("ERROR: keysign_message.proto does not exist: {:?}", keysign_proto);
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("keysign_message.proto not found: {:?}", keysign_proto),
        ));
    }
    println!("cargo:rerun-if-changed={}", keysign_proto.display());

    // Set protoc environment variables for vendored protoc
    let protoc = protoc_bin_vendored::protoc_bin_path()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
    let include = protoc_bin_vendored::include_path()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
    env::set_var("PROTOC", protoc);
    env::set_var("PROTOC_INCLUDE", include);

    // Generated types are also inspectable as JSON
    let mut config = prost_build::Config::new();
    config.type_attribute(".", "#[derive(::serde::Serialize, ::serde::Deserialize)]");
    config.type_attribute(".", "#[serde(rename_all = \"camelCase\", default)]");

    config.compile_protos(&[keysign_proto], &[proto_dir])?;

    Ok(())
}
