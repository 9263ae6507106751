use std::fs;
use std::path::Path;

use spike_rs::{
    build_spike_trains, find_synchronous_spikes, AnalysisResult, SessionStore, StimulusKind,
    TrainOptions,
};

fn write_session(root: &Path, id: &str, spikes: &str, stimuli: &str) {
    let dir = root.join(format!("ses-{}", id));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("flash_spikes.csv"), spikes).unwrap();
    fs::write(dir.join("flash_stimuli.csv"), stimuli).unwrap();
}

#[test]
fn test_store_to_synchrony_pipeline() {
    let tmp = tempfile::tempdir().unwrap();
    // Units 1 and 2 share a spike at exactly 0.125; unit 3 is in another
    // area. The spike at 3.0 falls outside every stimulus window.
    write_session(
        tmp.path(),
        "778240327",
        "spike_time,unit_id,brain_area\n\
         0.125,1,LM\n\
         0.125,2,LM\n\
         0.30,1,LM\n\
         1.10,2,LM\n\
         0.20,3,VISP\n\
         3.00,1,LM\n",
        "start_time\n0.0\n1.0\n",
    );

    let store = SessionStore::new(tmp.path());
    let (spikes, stimuli) = store.load_session("778240327", StimulusKind::Flash).unwrap();
    assert_eq!(spikes.len(), 6);

    let options = TrainOptions {
        brain_area: Some("lm".to_string()),
        ..TrainOptions::default()
    };
    let trains = build_spike_trains(&spikes, &stimuli, &options).unwrap();

    assert_eq!(trains.len(), 2);
    assert_eq!(trains[0].unit_id, 1);
    assert_eq!(trains[0].times, vec![0.125, 0.30]);
    assert_eq!(trains[1].unit_id, 2);
    assert_eq!(trains[1].times, vec![0.125, 1.10]);

    let events = find_synchronous_spikes(&trains).unwrap();
    assert_eq!(events.times, vec![0.125, 0.125]);
    assert_eq!(events.trains, vec![0, 1]);
}

#[test]
fn test_pipeline_without_synchrony() {
    let tmp = tempfile::tempdir().unwrap();
    write_session(
        tmp.path(),
        "111",
        "spike_time,unit_id,brain_area\n0.1,1,LM\n0.2,2,LM\n",
        "start_time\n0.0\n",
    );

    let store = SessionStore::new(tmp.path());
    let (spikes, stimuli) = store.load_session("111", StimulusKind::Flash).unwrap();
    let trains = build_spike_trains(&spikes, &stimuli, &TrainOptions::default()).unwrap();
    assert_eq!(trains.len(), 2);
    assert!(find_synchronous_spikes(&trains).is_none());
}

#[test]
fn test_pipeline_with_clipping() {
    let tmp = tempfile::tempdir().unwrap();
    // All spikes fall inside stimulus windows; clipping then cuts the tail
    // more than 0.3 s after the earliest selected spike.
    write_session(
        tmp.path(),
        "222",
        "spike_time,unit_id,brain_area\n0.10,1,LM\n0.20,1,LM\n0.45,1,LM\n",
        "start_time\n0.0\n",
    );

    let store = SessionStore::new(tmp.path());
    let (spikes, stimuli) = store.load_session("222", StimulusKind::Flash).unwrap();
    let options = TrainOptions {
        max_dur: Some(0.3),
        ..TrainOptions::default()
    };
    let trains = build_spike_trains(&spikes, &stimuli, &options).unwrap();
    assert_eq!(trains.len(), 1);
    assert_eq!(trains[0].times, vec![0.10, 0.20]);
}

#[test]
fn test_analysis_result_envelope() {
    let tmp = tempfile::tempdir().unwrap();
    write_session(
        tmp.path(),
        "333",
        "spike_time,unit_id,brain_area\n0.1,1,LM\n0.1,2,LM\n",
        "start_time\n0.0\n",
    );

    let store = SessionStore::new(tmp.path());
    let (spikes, stimuli) = store.load_session("333", StimulusKind::Flash).unwrap();
    let options = TrainOptions::default();
    let trains = build_spike_trains(&spikes, &stimuli, &options).unwrap();
    let synchrony = find_synchronous_spikes(&trains);

    let result = AnalysisResult::new(
        "333".to_string(),
        StimulusKind::Flash.prefix().to_string(),
        options,
        &trains,
        synchrony,
    );

    assert!(!result.id.is_empty());
    assert_eq!(result.session, "333");
    assert_eq!(result.stimulus, "flash");
    assert_eq!(result.trains.len(), 2);
    assert_eq!(result.trains[0].n_spikes, 1);
    let events = result.synchrony.as_ref().unwrap();
    assert_eq!(events.times, vec![0.1, 0.1]);
}
