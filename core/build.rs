// Build script for fast-ctd-core
//
// Links the compiled geometry extension (and the C++ standard library it
// needs) when the `native` feature is enabled.

fn main() {
    println!("cargo:rerun-if-env-changed=FAST_CTD_EXT_DIR");

    if std::env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Some(dir) = std::env::var_os("FAST_CTD_EXT_DIR") {
        println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
    }
    println!("cargo:rustc-link-lib=dylib=fast_ctd_ext");

    #[cfg(target_os = "linux")]
    println!("cargo:rustc-link-lib=stdc++");

    #[cfg(target_os = "macos")]
    println!("cargo:rustc-link-lib=c++");
}
