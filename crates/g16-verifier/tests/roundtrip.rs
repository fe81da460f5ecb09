//! End-to-end pipeline properties over the fixture circuits: prove with
//! `g16-prover`, then verify through every entry point.

use ark_bn254::Fr;
use ark_std::rand::{rngs::StdRng, SeedableRng};

use g16_circom::fixtures::product_calculator;
use g16_circom::parse_input_json;
use g16_prover::fixtures::{
    insecure_setup, product_circuit, product_witness, sum_circuit, sum_witness,
};
use g16_prover::{create_proof, Context};
use g16_types::{encode_public_inputs, Proof, ProvingKey, ProvingOutput, VerifyingKey};
use g16_verifier::{verify, verify_buffers, verify_proving_output, Verdict, VerifyError};

fn test_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn proven_product(rng: &mut StdRng) -> (ProvingKey, Vec<Fr>, Proof) {
    let cs = product_circuit();
    let pk = insecure_setup(&cs, rng);
    let witness = product_witness(3, 5);
    let proof = create_proof(&pk, &cs, &witness, rng).unwrap();
    let public_inputs = cs.public_inputs(&witness).to_vec();
    (pk, public_inputs, proof)
}

#[test]
fn test_round_trip_accepts() {
    let mut rng = test_rng();
    let (pk, public_inputs, proof) = proven_product(&mut rng);
    assert_eq!(
        verify(&pk.vk, &public_inputs, &proof).unwrap(),
        Verdict::Accepted
    );
}

#[test]
fn test_exported_key_round_trip() {
    // Export, ship, import: the standalone-verifier path never touches the
    // proving key.
    let mut rng = test_rng();
    let (pk, public_inputs, proof) = proven_product(&mut rng);

    let bytes = pk.vk.to_bytes().unwrap();
    let imported = VerifyingKey::from_bytes(&bytes).unwrap();
    assert_eq!(
        verify(&imported, &public_inputs, &proof).unwrap(),
        Verdict::Accepted
    );
}

#[test]
fn test_public_input_binding() {
    let mut rng = test_rng();
    let (pk, _, proof) = proven_product(&mut rng);
    assert_eq!(
        verify(&pk.vk, &[Fr::from(16u64)], &proof).unwrap(),
        Verdict::Rejected
    );
}

#[test]
fn test_determinism_modulo_randomness() {
    let mut rng = test_rng();
    let cs = product_circuit();
    let pk = insecure_setup(&cs, &mut rng);
    let witness = product_witness(3, 5);
    let public_inputs = cs.public_inputs(&witness).to_vec();

    let p1 = create_proof(&pk, &cs, &witness, &mut rng).unwrap();
    let p2 = create_proof(&pk, &cs, &witness, &mut rng).unwrap();
    assert_ne!(p1.to_bytes().unwrap(), p2.to_bytes().unwrap());
    assert_eq!(verify(&pk.vk, &public_inputs, &p1).unwrap(), Verdict::Accepted);
    assert_eq!(verify(&pk.vk, &public_inputs, &p2).unwrap(), Verdict::Accepted);
}

#[test]
fn test_cross_circuit_rejection() {
    let mut rng = test_rng();
    let (_, public_inputs, proof) = proven_product(&mut rng);

    // A key for a different relation with the same shape. 3 + 5 = 8, so
    // also check the sum circuit's own honest public input.
    let sum_cs = sum_circuit();
    let sum_pk = insecure_setup(&sum_cs, &mut rng);
    assert!(sum_cs.is_satisfied(&sum_witness(3, 5)));

    assert_eq!(
        verify(&sum_pk.vk, &public_inputs, &proof).unwrap(),
        Verdict::Rejected
    );
    assert_eq!(
        verify(&sum_pk.vk, &[Fr::from(8u64)], &proof).unwrap(),
        Verdict::Rejected
    );
}

#[test]
fn test_tamper_sensitivity() {
    let mut rng = test_rng();
    let (pk, public_inputs, proof) = proven_product(&mut rng);
    let bytes = proof.to_bytes().unwrap();

    // One flipped bit across every proof element: either the point no
    // longer decodes (an encoding error) or the pairing check fails. Never
    // an accept.
    for index in [0usize, 13, 31, 32, 64, 95, 96, 110, 127] {
        for bit in [0u8, 3, 7] {
            let mut tampered = bytes.clone();
            tampered[index] ^= 1 << bit;
            match Proof::from_bytes(&tampered) {
                Ok(decoded) => {
                    assert_ne!(
                        verify(&pk.vk, &public_inputs, &decoded).unwrap(),
                        Verdict::Accepted,
                        "accepted proof tampered at byte {index} bit {bit}"
                    );
                }
                Err(_) => {} // malformed encoding is an acceptable outcome
            }
        }
    }
}

#[test]
fn test_full_pipeline_via_context() {
    // The complete engine flow: load a context from artifacts, prove from a
    // JSON assignment, export the key, verify through both adapters.
    let mut rng = test_rng();
    let cs = product_circuit();
    let pk = insecure_setup(&cs, &mut rng);
    let ctx = Context::from_parts(cs, product_calculator(), pk).unwrap();

    let assignment = parse_input_json(r#"{"a": ["3"], "b": ["5"]}"#).unwrap();
    let (public_inputs, proof) = ctx.prove(&assignment, &mut rng).unwrap();
    assert_eq!(public_inputs, vec![Fr::from(15u64)]);

    // Legacy pair of strings.
    let vk_hex = ctx.verifying_key().to_hex().unwrap();
    let blob = ProvingOutput::from_parts(&public_inputs, &proof)
        .unwrap()
        .to_json()
        .unwrap();
    assert_eq!(
        verify_proving_output(&vk_hex, &blob).unwrap(),
        Verdict::Accepted
    );

    // Current three buffers.
    let mut vk_buf = vec![0u8; ctx.verifying_key_size()];
    ctx.export_verifying_key(&mut vk_buf).unwrap();
    let input_buf = encode_public_inputs(&public_inputs).unwrap();
    let proof_buf = proof.to_bytes().unwrap();
    assert_eq!(
        verify_buffers(&vk_buf, &input_buf, &proof_buf).unwrap(),
        Verdict::Accepted
    );

    // The blob binds its public inputs.
    let tampered = ProvingOutput {
        public_inputs: vec!["16".into()],
        proof: proof.to_hex().unwrap(),
    };
    assert_eq!(
        verify_proving_output(&vk_hex, &tampered.to_json().unwrap()).unwrap(),
        Verdict::Rejected
    );
}

#[test]
fn test_adapters_report_encoding_errors() {
    let mut rng = test_rng();
    let (pk, public_inputs, proof) = proven_product(&mut rng);
    let vk_buf = pk.vk.to_bytes().unwrap();
    let input_buf = encode_public_inputs(&public_inputs).unwrap();
    let proof_buf = proof.to_bytes().unwrap();

    // Truncated verifying key.
    assert!(matches!(
        verify_buffers(&vk_buf[..vk_buf.len() - 1], &input_buf, &proof_buf),
        Err(VerifyError::Encoding(_))
    ));
    // Public-input buffer not a multiple of the scalar width.
    assert!(matches!(
        verify_buffers(&vk_buf, &input_buf[..input_buf.len() - 1], &proof_buf),
        Err(VerifyError::Encoding(_))
    ));
    // Short proof buffer.
    assert!(matches!(
        verify_buffers(&vk_buf, &input_buf, &proof_buf[..127]),
        Err(VerifyError::Encoding(_))
    ));
    // Unparseable legacy blob.
    assert!(matches!(
        verify_proving_output("zz not hex", "{}"),
        Err(VerifyError::Encoding(_))
    ));
}
