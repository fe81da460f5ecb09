// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! # g16-ffi
//!
//! C ABI over the g16 engine, for embedding in non-Rust hosts. The context
//! crosses the boundary as an opaque pointer that the caller must free with
//! [`g16_free_context_bn254`]; every other structure crosses as bytes.
//!
//! ## Return-code convention (stable)
//!
//! | Call | Success | Failure |
//! |---|---|---|
//! | `g16_verify_bn254`, `g16_verify_buffers_bn254` | `1` accepted, `0` rejected | `-2` malformed input |
//! | `g16_prove_bn254`, `g16_export_verifying_key_bn254` | bytes written (`>= 0`) | `-1` invalid argument or failure, `-1000` buffer too small |
//! | `g16_verifying_key_size_bn254` | size in bytes | `-1` null context |
//! | `g16_load_context_bn254` | non-null context | null |

use std::ffi::{c_char, c_int, CStr};

use anyhow::Context as _;
use tracing::error;

use g16_prover::Context;
use g16_types::ProvingOutput;
use g16_verifier::Verdict;

/// Invalid argument or internal failure.
pub const G16_ERR_INVALID: c_int = -1;
/// Verification could not run on the given bytes.
pub const G16_ERR_MALFORMED: c_int = -2;
/// Caller-provided buffer is shorter than the payload.
pub const G16_ERR_BUFFER_TOO_SMALL: c_int = -1000;

/// Parse the three artifact paths and build a proving context. Returns null
/// on any failure; the caller owns the returned pointer and must release it
/// with [`g16_free_context_bn254`].
///
/// # Safety
///
/// All three pointers must be valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn g16_load_context_bn254(
    wasm_path: *const c_char,
    r1cs_path: *const c_char,
    zkey_path: *const c_char,
) -> *mut Context {
    let paths = (|| -> anyhow::Result<(&str, &str, &str)> {
        anyhow::ensure!(
            !wasm_path.is_null() && !r1cs_path.is_null() && !zkey_path.is_null(),
            "null artifact path"
        );
        Ok((
            CStr::from_ptr(wasm_path).to_str().context("wasm path is not utf-8")?,
            CStr::from_ptr(r1cs_path).to_str().context("r1cs path is not utf-8")?,
            CStr::from_ptr(zkey_path).to_str().context("zkey path is not utf-8")?,
        ))
    })();
    let (wasm, r1cs, zkey) = match paths {
        Ok(paths) => paths,
        Err(err) => {
            error!("load_context: {err:#}");
            return std::ptr::null_mut();
        }
    };
    match Context::load(wasm, r1cs, zkey) {
        Ok(ctx) => Box::into_raw(Box::new(ctx)),
        Err(err) => {
            error!("load_context: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Release a context created by [`g16_load_context_bn254`]. Passing null is
/// a no-op; passing the same pointer twice is undefined behavior.
///
/// # Safety
///
/// `ctx` must be null or a pointer previously returned by
/// [`g16_load_context_bn254`] that has not been freed.
#[no_mangle]
pub unsafe extern "C" fn g16_free_context_bn254(ctx: *mut Context) {
    if !ctx.is_null() {
        drop(Box::from_raw(ctx));
    }
}

/// Exact byte size of the exported verifying key; query before calling
/// [`g16_export_verifying_key_bn254`].
#[no_mangle]
pub extern "C" fn g16_verifying_key_size_bn254(ctx: Option<&Context>) -> c_int {
    match ctx {
        Some(ctx) => ctx.verifying_key_size() as c_int,
        None => G16_ERR_INVALID,
    }
}

/// Write the verifying key (canonical compressed bytes) into `buf`.
///
/// # Safety
///
/// `buf` must point to at least `max_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn g16_export_verifying_key_bn254(
    ctx: Option<&Context>,
    buf: *mut c_char,
    max_len: c_int,
) -> c_int {
    let Some(ctx) = ctx else {
        return G16_ERR_INVALID;
    };
    let size = ctx.verifying_key_size();
    if buf.is_null() || max_len < 0 {
        return G16_ERR_INVALID;
    }
    if (max_len as usize) < size {
        return G16_ERR_BUFFER_TOO_SMALL;
    }
    let out = std::slice::from_raw_parts_mut(buf as *mut u8, size);
    match ctx.export_verifying_key(out) {
        Ok(written) => written as c_int,
        Err(err) => {
            error!("export_verifying_key: {err}");
            G16_ERR_INVALID
        }
    }
}

/// Prove over a JSON input assignment and write the proving-output blob
/// (JSON, NUL-terminated) into `buf`. Returns the number of bytes written,
/// excluding the terminator.
///
/// # Safety
///
/// `input` must be a valid NUL-terminated string; `buf` must point to at
/// least `max_len` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn g16_prove_bn254(
    ctx: Option<&Context>,
    input: *const c_char,
    buf: *mut c_char,
    max_len: c_int,
) -> c_int {
    let Some(ctx) = ctx else {
        return G16_ERR_INVALID;
    };
    if input.is_null() || buf.is_null() || max_len < 0 {
        return G16_ERR_INVALID;
    }
    let output = (|| -> anyhow::Result<String> {
        let input = CStr::from_ptr(input).to_str().context("input is not utf-8")?;
        let (public_inputs, proof) = ctx.prove_json(input)?;
        let blob = ProvingOutput::from_parts(&public_inputs, &proof)?;
        Ok(blob.to_json()?)
    })();
    let output = match output {
        Ok(output) => output,
        Err(err) => {
            error!("prove: {err:#}");
            return G16_ERR_INVALID;
        }
    };
    let bytes = output.as_bytes();
    if (max_len as usize) < bytes.len() + 1 {
        return G16_ERR_BUFFER_TOO_SMALL;
    }
    std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf as *mut u8, bytes.len());
    *buf.add(bytes.len()) = 0;
    bytes.len() as c_int
}

/// Legacy verification: hex verifying key plus the combined proving-output
/// blob, both NUL-terminated strings.
///
/// # Safety
///
/// Both pointers must be valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn g16_verify_bn254(
    vk: *const c_char,
    proving_output: *const c_char,
) -> c_int {
    if vk.is_null() || proving_output.is_null() {
        return G16_ERR_MALFORMED;
    }
    let decoded = (|| -> anyhow::Result<Verdict> {
        let vk = CStr::from_ptr(vk).to_str().context("vk is not utf-8")?;
        let blob = CStr::from_ptr(proving_output)
            .to_str()
            .context("proving output is not utf-8")?;
        Ok(g16_verifier::verify_proving_output(vk, blob)?)
    })();
    verdict_code(decoded)
}

/// Current verification: three explicit `(pointer, length)` buffers for the
/// verifying key, the concatenated public-input scalars and the proof.
///
/// # Safety
///
/// Each pointer must reference at least the matching number of readable
/// bytes.
#[no_mangle]
pub unsafe extern "C" fn g16_verify_buffers_bn254(
    vk: *const c_char,
    vk_len: c_int,
    inputs: *const c_char,
    input_len: c_int,
    proof: *const c_char,
    proof_len: c_int,
) -> c_int {
    if vk.is_null() || inputs.is_null() || proof.is_null() {
        return G16_ERR_MALFORMED;
    }
    if vk_len < 0 || input_len < 0 || proof_len < 0 {
        return G16_ERR_MALFORMED;
    }
    let vk = std::slice::from_raw_parts(vk as *const u8, vk_len as usize);
    let inputs = std::slice::from_raw_parts(inputs as *const u8, input_len as usize);
    let proof = std::slice::from_raw_parts(proof as *const u8, proof_len as usize);
    verdict_code(g16_verifier::verify_buffers(vk, inputs, proof).map_err(Into::into))
}

fn verdict_code(result: anyhow::Result<Verdict>) -> c_int {
    match result {
        Ok(Verdict::Accepted) => 1,
        Ok(Verdict::Rejected) => 0,
        Err(err) => {
            error!("verify: {err:#}");
            G16_ERR_MALFORMED
        }
    }
}
