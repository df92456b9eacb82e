use crate::harness::{Assertion, Scenario};
use assertbench_core::SimEvent;

#[test]
fn test_empty_collection_exits_on_done() {
    Scenario::new("empty_collection_exits_on_done")
        .torture()
        .done_after(0)
        .assert_completed()
        .assert_iterations(0)
        .assert_no_endpoint_interaction()
        .assert_last_event(SimEvent::Done { finished: true })
        .assert_finished()
        .run()
        .expect("empty torture run should finish on first done()");
}

#[test]
fn test_empty_collection_polls_until_done() {
    Scenario::new("empty_collection_polls_until_done")
        .torture()
        .done_after(25)
        .assert_iterations(25)
        .assert_no_endpoint_interaction()
        .run()
        .unwrap();
}

#[test]
fn test_single_endpoint_resumed_on_each_firing() {
    Scenario::new("single_endpoint_resumed_on_each_firing")
        .endpoint(&[3, 7])
        .torture()
        .done_after(10)
        .assert_completed()
        .assert_iterations(10)
        .assert_resumed_at(0, &[3, 7])
        .assert_tick_count(0, 10)
        .assert_resumed_before_next_tick()
        .run()
        .unwrap();
}

#[test]
fn test_latch_reads_clear_after_resume() {
    Scenario::new("latch_reads_clear_after_resume")
        .endpoint(&[2])
        .torture()
        .done_after(4)
        .assert_sequence(&[
            SimEvent::Terminate {
                channel: 0,
                tick: 2,
                fired: true,
            },
            SimEvent::Resume { channel: 0, tick: 2 },
        ])
        .assert_sequence(&[
            SimEvent::Tick { channel: 0, tick: 3 },
            SimEvent::Terminate {
                channel: 0,
                tick: 3,
                fired: false,
            },
        ])
        .run()
        .unwrap();
}

#[test]
fn test_consecutive_firings_each_drained() {
    Scenario::new("consecutive_firings_each_drained")
        .endpoint(&[1, 2, 3, 4])
        .torture()
        .done_after(6)
        .assert_resumed_at(0, &[1, 2, 3, 4])
        .assert_resumed_before_next_tick()
        .run()
        .unwrap();
}

#[test]
fn test_same_tick_firings_resumed_in_order() {
    Scenario::new("same_tick_firings_resumed_in_order")
        .endpoint(&[4])
        .endpoint(&[4])
        .torture()
        .done_after(6)
        .assert_completed()
        .assert_sequence(&[
            SimEvent::Tick { channel: 0, tick: 4 },
            SimEvent::Terminate {
                channel: 0,
                tick: 4,
                fired: true,
            },
            SimEvent::Resume { channel: 0, tick: 4 },
            SimEvent::Tick { channel: 1, tick: 4 },
            SimEvent::Terminate {
                channel: 1,
                tick: 4,
                fired: true,
            },
            SimEvent::Resume { channel: 1, tick: 4 },
        ])
        .run()
        .unwrap();
}

#[test]
fn test_earlier_firing_does_not_skip_siblings() {
    Scenario::new("earlier_firing_does_not_skip_siblings")
        .endpoint(&[1, 2, 3])
        .quiet_endpoints(3)
        .torture()
        .done_after(5)
        .assert_tick_count(0, 5)
        .assert_tick_count(1, 5)
        .assert_tick_count(2, 5)
        .assert_tick_count(3, 5)
        .assert(Assertion::ResumedAt {
            channel: 1,
            ticks: vec![],
        })
        .run()
        .unwrap();
}

#[test]
fn test_interleaved_firings_across_endpoints() {
    Scenario::new("interleaved_firings_across_endpoints")
        .endpoint(&[1, 5])
        .endpoint(&[2])
        .endpoint(&[5, 9])
        .torture()
        .done_after(12)
        .assert_completed()
        .assert_resumed_at(0, &[1, 5])
        .assert_resumed_at(1, &[2])
        .assert_resumed_at(2, &[5, 9])
        .assert_resumed_before_next_tick()
        .run()
        .unwrap();
}

#[test]
fn test_firings_after_done_never_observed() {
    Scenario::new("firings_after_done_never_observed")
        .endpoint(&[20])
        .torture()
        .done_after(10)
        .assert_completed()
        .assert_no_resume()
        .assert_tick_count(0, 10)
        .run()
        .unwrap();
}
