use pretty_assertions::assert_eq;
use trivialnet::backends::{TrivialComputation, TrivialNetwork};
use trivialnet::encoder::encode_position;
use trivialnet::eval::evaluate;
use trivialnet::eval::policy::LOG_POLICY;
use trivialnet::positions::random_positions;
use trivialnet::{InputFormat, InputPlanes, Network, NetworkComputation, POLICY_SIZE};

fn batch(n: usize, seed: u64) -> Vec<InputPlanes> {
    random_positions(n, 50, seed)
        .iter()
        .map(|b| encode_position(b, InputFormat::Classical112).unwrap())
        .collect()
}

#[test]
fn empty_computation() {
    let net = TrivialNetwork::default();
    let mut comp = net.new_computation();
    comp.compute_blocking().unwrap();
    assert_eq!(comp.batch_size(), 0);
}

#[test]
fn values_match_isolated_evaluation() {
    let inputs = batch(32, 11);
    let net = TrivialNetwork::default();
    let mut comp = net.new_computation();
    for planes in &inputs { comp.add_input(planes.clone()); }
    comp.compute_blocking().unwrap();
    assert_eq!(comp.batch_size(), inputs.len());
    for (k, planes) in inputs.iter().enumerate() {
        assert_eq!(comp.value(k).to_bits(), evaluate(planes).to_bits(), "sample {k}");
        assert_eq!(comp.draw(k), 0.0);
        assert_eq!(comp.moves_left(k), 0.0);
    }
}

#[test]
fn compute_blocking_is_idempotent() {
    let inputs = batch(4, 3);
    let mut comp = TrivialComputation::new();
    for planes in inputs { comp.add_input(planes); }
    comp.compute_blocking().unwrap();
    let first: Vec<f32> = (0..comp.batch_size()).map(|i| comp.value(i)).collect();
    comp.compute_blocking().unwrap();
    let second: Vec<f32> = (0..comp.batch_size()).map(|i| comp.value(i)).collect();
    assert_eq!(first, second);
}

#[test]
fn policy_is_identical_for_every_sample() {
    // The policy is a fixed prior; differing positions must still agree.
    let inputs = batch(8, 5);
    let mut comp = TrivialComputation::new();
    for planes in inputs { comp.add_input(planes); }
    comp.compute_blocking().unwrap();
    for m in [0, 1, 917, POLICY_SIZE - 1] {
        for i in 0..comp.batch_size() {
            assert_eq!(comp.policy_logit(i, m).to_bits(), LOG_POLICY[m].to_bits());
        }
    }
    assert!(LOG_POLICY.iter().all(|&l| l <= 0.0), "log-probabilities are never positive");
}

#[test]
fn separate_computations_are_independent() {
    let net = TrivialNetwork::default();
    let mut a = net.new_computation();
    let mut b = net.new_computation();
    let inputs = batch(3, 9);
    a.add_input(inputs[0].clone());
    b.add_input(inputs[1].clone());
    b.add_input(inputs[2].clone());
    assert_eq!(a.batch_size(), 1);
    assert_eq!(b.batch_size(), 2);
    assert_eq!(b.value(0).to_bits(), evaluate(&inputs[1]).to_bits());
}

#[test]
#[should_panic]
fn reading_past_the_batch_panics() {
    let mut comp = TrivialComputation::new();
    comp.add_input(batch(1, 1).remove(0));
    comp.compute_blocking().unwrap();
    let _ = comp.value(1);
}

#[test]
#[should_panic]
fn policy_index_past_the_end_panics() {
    let comp = TrivialComputation::new();
    let _ = comp.policy_logit(0, POLICY_SIZE);
}

#[test]
fn shared_network_across_threads() {
    let net = TrivialNetwork::default();
    let inputs = batch(16, 21);
    let expected: Vec<f32> = inputs.iter().map(|p| evaluate(p)).collect();
    std::thread::scope(|s| {
        for chunk in inputs.chunks(4) {
            let net = &net;
            let expected = &expected;
            s.spawn(move || {
                let mut comp = net.new_computation();
                for p in chunk { comp.add_input(p.clone()); }
                comp.compute_blocking().unwrap();
                for i in 0..comp.batch_size() {
                    assert!(expected.contains(&comp.value(i)));
                }
            });
        }
    });
}
