//! Test fixtures: a hand-written implementation of the calculator ABI for
//! the circuit `out = a * b` (witness `[1, out, a, b]`, inputs small enough
//! to fit one limb). Stands in for compiled circom output, which cannot be
//! checked into the repository.

use crate::witness::{signal_hash, WitnessCalculator};

const PRODUCT_WAT: &str = r#"
(module
  (import "runtime" "exceptionHandler" (func $exc (param i32)))
  (memory (export "memory") 1)
  (global $count (mut i32) (i32.const 0))
  (func (export "getVersion") (result i32) (i32.const 2))
  (func (export "getFieldNumLen32") (result i32) (i32.const 8))
  (func (export "getInputSize") (result i32) (i32.const 2))
  (func (export "getWitnessSize") (result i32) (i32.const 4))
  (func (export "init") (param i32)
    (global.set $count (i32.const 0)))
  (func (export "writeSharedRWMemory") (param $i i32) (param $v i32)
    (i32.store (i32.mul (local.get $i) (i32.const 4)) (local.get $v)))
  (func (export "readSharedRWMemory") (param $i i32) (result i32)
    (i32.load (i32.mul (local.get $i) (i32.const 4))))
  (func $save (param $dst i32)
    (memory.copy (local.get $dst) (i32.const 0) (i32.const 32)))
  (func $load (param $src i32)
    (memory.copy (i32.const 0) (local.get $src) (i32.const 32)))
  (func $clear
    (memory.fill (i32.const 0) (i32.const 0) (i32.const 32)))
  (func (export "setInputSignal") (param $msb i32) (param $lsb i32) (param $pos i32)
    (if (i32.and (i32.eq (local.get $msb) (i32.const {A_MSB}))
                 (i32.eq (local.get $lsb) (i32.const {A_LSB})))
      (then
        (call $save (i32.const 64))
        (global.set $count (i32.add (global.get $count) (i32.const 1)))
        (return)))
    (if (i32.and (i32.eq (local.get $msb) (i32.const {B_MSB}))
                 (i32.eq (local.get $lsb) (i32.const {B_LSB})))
      (then
        (call $save (i32.const 96))
        (global.set $count (i32.add (global.get $count) (i32.const 1)))
        (return)))
    (call $exc (i32.const 1))
    (unreachable))
  (func (export "getRawPrime")
    (call $clear)
    (i32.store (i32.const 0) (i32.const 0xf0000001))
    (i32.store (i32.const 4) (i32.const 0x43e1f593))
    (i32.store (i32.const 8) (i32.const 0x79b97091))
    (i32.store (i32.const 12) (i32.const 0x2833e848))
    (i32.store (i32.const 16) (i32.const 0x8181585d))
    (i32.store (i32.const 20) (i32.const 0xb85045b6))
    (i32.store (i32.const 24) (i32.const 0xe131a029))
    (i32.store (i32.const 28) (i32.const 0x30644e72)))
  (func (export "getWitness") (param $i i32)
    (if (i32.lt_s (global.get $count) (i32.const 2))
      (then (call $exc (i32.const 4)) (unreachable)))
    (call $clear)
    (if (i32.eq (local.get $i) (i32.const 0))
      (then (i32.store (i32.const 0) (i32.const 1)) (return)))
    (if (i32.eq (local.get $i) (i32.const 1))
      (then
        (i32.store (i32.const 0)
          (i32.mul (i32.load (i32.const 64)) (i32.load (i32.const 96))))
        (return)))
    (if (i32.eq (local.get $i) (i32.const 2))
      (then (call $load (i32.const 64)) (return)))
    (call $load (i32.const 96)))
)
"#;

/// The wat text of the product-circuit calculator, signal hashes filled in.
pub fn product_calculator_wat() -> String {
    let (a_msb, a_lsb) = signal_hash("a");
    let (b_msb, b_lsb) = signal_hash("b");
    PRODUCT_WAT
        .replace("{A_MSB}", &a_msb.to_string())
        .replace("{A_LSB}", &a_lsb.to_string())
        .replace("{B_MSB}", &b_msb.to_string())
        .replace("{B_LSB}", &b_lsb.to_string())
}

/// A loaded calculator for the product circuit (signals `a` and `b`).
pub fn product_calculator() -> WitnessCalculator {
    WitnessCalculator::from_bytes(product_calculator_wat().as_bytes())
        .expect("product fixture must load")
}
