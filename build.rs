fn main() {
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let out_dir = std::path::Path::new(&crate_dir).join("include");

    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    std::fs::create_dir_all(&out_dir).expect("Failed to create include directory");
    let header_path = out_dir.join("calc_rs.h");

    let mut config = cbindgen::Config::from_file(std::path::Path::new(&crate_dir).join("cbindgen.toml"))
        .expect("Failed to load cbindgen.toml");

    if std::env::var("CARGO_FEATURE_LIBM").is_ok() {
        let _ = config
            .after_includes
            .insert("#define CALC_RS_USE_LIBM".to_string());
    }

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(header_path);
        }
        Err(e) => {
            // The Rust library does not need the header.
            println!("cargo:warning=Unable to generate bindings: {e}");
        }
    }
}
