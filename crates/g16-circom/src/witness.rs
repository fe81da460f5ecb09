// Copyright 2026 g16 developers
// Licensed under the Apache License, Version 2.0

//! Wasm witness calculator (circom-2 runtime ABI).
//!
//! The compiled circuit program is executed by wasmer. Field values cross
//! the boundary as `n32` 32-bit limbs through the module's shared
//! read/write buffer, input signals are addressed by the 64-bit FNV-1a hash
//! of their name, and runtime failures surface through the
//! `runtime.exceptionHandler` import just before the module traps.

use std::collections::HashMap;
use std::path::Path;

use ark_bn254::Fr;
use ark_ff::PrimeField;
use num_bigint::{BigInt, BigUint};
use tracing::debug;
use wasmer::{
    imports, Function, FunctionEnv, FunctionEnvMut, Instance, Module, Store, TypedFunction,
};

use crate::error::{malformed, ArtifactError, WitnessError};

/// Values supplied for one proof: signal name -> ordered values.
pub type InputAssignment = HashMap<String, Vec<BigInt>>;

/// Message table of the circom runtime's exception codes.
fn exception_message(code: i32) -> &'static str {
    match code {
        1 => "signal not found",
        2 => "too many input signals set",
        3 => "signal already set",
        4 => "assert failed",
        5 => "not enough memory",
        6 => "input signal array access exceeds the size",
        _ => "unknown runtime error",
    }
}

#[derive(Default)]
struct RuntimeState {
    exception: Option<i32>,
}

/// One loaded circuit program. Execution keeps mutable scratch state inside
/// the wasm instance, so a calculator must not be shared between threads
/// without external synchronization; `init` is re-run on every call, which
/// makes sequential reuse safe.
pub struct WitnessCalculator {
    store: Store,
    instance: Instance,
    state: FunctionEnv<RuntimeState>,
    n32: u32,
    num_inputs: usize,
}

impl WitnessCalculator {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let mut store = Store::default();
        let module = Module::new(&store, bytes)
            .map_err(|e| malformed(format!("invalid circuit wasm: {e}")))?;
        let state = FunctionEnv::new(&mut store, RuntimeState::default());

        let on_exception = Function::new_typed_with_env(
            &mut store,
            &state,
            |mut env: FunctionEnvMut<RuntimeState>, code: i32| {
                env.data_mut().exception = Some(code);
            },
        );
        // The remaining runtime hooks only matter for circom's debug logging;
        // they are provided so every calculator generation instantiates.
        let imports = imports! {
            "runtime" => {
                "exceptionHandler" => on_exception,
                "printErrorMessage" => Function::new_typed(&mut store, || {}),
                "writeBufferMessage" => Function::new_typed(&mut store, || {}),
                "showSharedRWMemory" => Function::new_typed(&mut store, || {}),
                "error" => Function::new_typed(&mut store, |_: i32, _: i32, _: i32, _: i32, _: i32, _: i32| {}),
                "log" => Function::new_typed(&mut store, |_: i32| {}),
                "logSetSignal" => Function::new_typed(&mut store, |_: i32, _: i32| {}),
                "logGetSignal" => Function::new_typed(&mut store, |_: i32, _: i32| {}),
                "logStartComponent" => Function::new_typed(&mut store, |_: i32| {}),
                "logFinishComponent" => Function::new_typed(&mut store, |_: i32| {}),
            }
        };
        let instance = Instance::new(&mut store, &module, &imports)
            .map_err(|e| malformed(format!("failed to instantiate circuit wasm: {e}")))?;

        let mut calc = Self {
            store,
            instance,
            state,
            n32: 0,
            num_inputs: 0,
        };

        // circom-1 calculators do not export getVersion
        let version = match calc.get_fn::<(), i32>("getVersion") {
            Ok(f) => f
                .call(&mut calc.store)
                .map_err(|e| malformed(format!("getVersion failed: {e}")))?,
            Err(_) => 1,
        };
        if version < 2 {
            return Err(ArtifactError::UnsupportedVersion(version.max(0) as u32));
        }

        calc.call_init()
            .map_err(|e| malformed(format!("calculator init failed: {e}")))?;

        let field_len: TypedFunction<(), i32> = calc
            .get_fn("getFieldNumLen32")
            .map_err(|e| malformed(e.to_string()))?;
        calc.n32 = field_len
            .call(&mut calc.store)
            .map_err(|e| malformed(format!("getFieldNumLen32 failed: {e}")))? as u32;

        let raw_prime: TypedFunction<(), ()> = calc
            .get_fn("getRawPrime")
            .map_err(|e| malformed(e.to_string()))?;
        raw_prime
            .call(&mut calc.store)
            .map_err(|e| malformed(format!("getRawPrime failed: {e}")))?;
        let prime = calc
            .read_buffer()
            .map_err(|e| malformed(e.to_string()))?;
        if prime != BigUint::from(Fr::MODULUS) {
            return Err(malformed("circuit field is not the BN254 scalar field"));
        }

        let input_size: TypedFunction<(), i32> = calc
            .get_fn("getInputSize")
            .map_err(|e| malformed(e.to_string()))?;
        calc.num_inputs = input_size
            .call(&mut calc.store)
            .map_err(|e| malformed(format!("getInputSize failed: {e}")))? as usize;

        debug!(n32 = calc.n32, inputs = calc.num_inputs, "loaded witness calculator");
        Ok(calc)
    }

    /// Total number of input signal values the circuit expects.
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Run the circuit on `assignment` and return the full witness vector,
    /// `witness[0] == 1`, public signals first.
    pub fn calculate_witness(
        &mut self,
        assignment: &InputAssignment,
    ) -> Result<Vec<Fr>, WitnessError> {
        let supplied: usize = assignment.values().map(Vec::len).sum();
        if supplied != self.num_inputs {
            return Err(WitnessError::UnsatisfiedSignal {
                expected: self.num_inputs,
                got: supplied,
            });
        }

        // fresh scratch state for this run
        self.call_init()?;

        let modulus = BigInt::from(BigUint::from(Fr::MODULUS));
        let set_signal: TypedFunction<(i32, i32, i32), ()> = self.get_fn("setInputSignal")?;
        for (name, values) in assignment {
            let (msb, lsb) = signal_hash(name);
            for (pos, value) in values.iter().enumerate() {
                let reduced = ((value % &modulus) + &modulus) % &modulus;
                self.write_buffer(reduced.magnitude())?;
                self.clear_exception();
                let call = set_signal.call(&mut self.store, msb as i32, lsb as i32, pos as i32);
                if let Err(e) = call {
                    return Err(match self.exception_code() {
                        Some(1) => WitnessError::UnknownSignal(name.clone()),
                        Some(code) => WitnessError::ExecutionTrap(format!(
                            "{} (signal `{name}`)",
                            exception_message(code)
                        )),
                        None => WitnessError::ExecutionTrap(format!("setInputSignal `{name}`: {e}")),
                    });
                }
            }
        }

        let witness_size: TypedFunction<(), i32> = self.get_fn("getWitnessSize")?;
        self.clear_exception();
        let len = witness_size
            .call(&mut self.store)
            .map_err(|e| self.trap_error("getWitnessSize", e))? as usize;

        let get_witness: TypedFunction<i32, ()> = self.get_fn("getWitness")?;
        let mut witness = Vec::with_capacity(len);
        for i in 0..len {
            self.clear_exception();
            get_witness
                .call(&mut self.store, i as i32)
                .map_err(|e| self.trap_error("getWitness", e))?;
            witness.push(Fr::from(self.read_buffer()?));
        }
        debug!(len, "computed witness");
        Ok(witness)
    }

    fn get_fn<Args, Rets>(&self, name: &str) -> Result<TypedFunction<Args, Rets>, WitnessError>
    where
        Args: wasmer::WasmTypeList,
        Rets: wasmer::WasmTypeList,
    {
        self.instance
            .exports
            .get_typed_function(&self.store, name)
            .map_err(|e| WitnessError::ExecutionTrap(format!("missing wasm export `{name}`: {e}")))
    }

    fn call_init(&mut self) -> Result<(), WitnessError> {
        let init: TypedFunction<i32, ()> = self.get_fn("init")?;
        self.clear_exception();
        init.call(&mut self.store, 1)
            .map_err(|e| self.trap_error("init", e))
    }

    fn clear_exception(&mut self) {
        self.state.as_mut(&mut self.store).exception = None;
    }

    fn exception_code(&self) -> Option<i32> {
        self.state.as_ref(&self.store).exception
    }

    fn trap_error(&self, what: &str, err: wasmer::RuntimeError) -> WitnessError {
        match self.exception_code() {
            Some(code) => WitnessError::ExecutionTrap(exception_message(code).to_string()),
            None => WitnessError::ExecutionTrap(format!("{what}: {err}")),
        }
    }

    fn write_limb(&mut self, index: u32, value: u32) -> Result<(), WitnessError> {
        let write: TypedFunction<(i32, i32), ()> = self.get_fn("writeSharedRWMemory")?;
        write
            .call(&mut self.store, index as i32, value as i32)
            .map_err(|e| self.trap_error("writeSharedRWMemory", e))
    }

    fn read_limb(&mut self, index: u32) -> Result<u32, WitnessError> {
        let read: TypedFunction<i32, i32> = self.get_fn("readSharedRWMemory")?;
        read.call(&mut self.store, index as i32)
            .map(|v| v as u32)
            .map_err(|e| self.trap_error("readSharedRWMemory", e))
    }

    fn read_buffer(&mut self) -> Result<BigUint, WitnessError> {
        let mut limbs = Vec::with_capacity(self.n32 as usize);
        for i in 0..self.n32 {
            limbs.push(self.read_limb(i)?);
        }
        Ok(BigUint::from_slice(&limbs))
    }

    fn write_buffer(&mut self, value: &BigUint) -> Result<(), WitnessError> {
        let mut limbs = value.to_u32_digits();
        if limbs.len() > self.n32 as usize {
            return Err(WitnessError::InvalidInput(format!(
                "value needs {} limbs, field has {}",
                limbs.len(),
                self.n32
            )));
        }
        limbs.resize(self.n32 as usize, 0);
        for (i, limb) in limbs.iter().enumerate() {
            self.write_limb(i as u32, *limb)?;
        }
        Ok(())
    }
}

/// 64-bit FNV-1a of a signal name, split `(msb, lsb)` as the ABI expects.
pub(crate) fn signal_hash(name: &str) -> (u32, u32) {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in name.bytes() {
        h ^= u64::from(byte);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    ((h >> 32) as u32, h as u32)
}
