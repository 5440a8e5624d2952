use vergen::EmitBuilder;

fn main() {
    print_build_directives();
    generate_build_info();
}

// -----------------------------------------------------------------------------
// Directives
// -----------------------------------------------------------------------------
fn print_build_directives() {
    // any code change
    println!("cargo:rerun-if-changed=src/");
}

// -----------------------------------------------------------------------------
// Code generation: Build Info
// -----------------------------------------------------------------------------
fn generate_build_info() {
    if let Err(e) = EmitBuilder::builder()
        .build_timestamp()
        .cargo_debug()
        .cargo_features()
        .rustc_semver()
        .rustc_channel()
        .rustc_host_triple()
        .emit()
    {
        panic!("failed to emit build information | reason={e:?}");
    };
}
