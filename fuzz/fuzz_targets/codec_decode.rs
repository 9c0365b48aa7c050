#![no_main]

use libfuzzer_sys::fuzz_target;
use scanner::StateCodec;

fuzz_target!(|data: &[u8]| {
    let codec = StateCodec::default();
    let state = codec.decode(data);

    let mut buffer = vec![0u8; codec.capacity()];
    let outcome = codec.encode(&state, &mut buffer);
    assert!(outcome.written <= buffer.len());
    if outcome.is_lossless() {
        let again = codec.decode(&buffer[..outcome.written]);
        assert_eq!(again.tags.len(), state.tags.len());
        assert_eq!(again.sections.len(), state.sections.len());
    }
});
