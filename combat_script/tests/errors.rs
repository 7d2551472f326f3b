use combat_script::{CompileError, ScriptErrorKind, compile_script};

fn fail(src: &str) -> CompileError {
    compile_script(src).expect_err("script should not compile")
}

#[test]
fn chain_errors() {
    let err = fail("http://a\nturn 1:\ncharacter1.target(1)\nend");
    assert_eq!(err.kind, ScriptErrorKind::TargetWithoutSkillArmed);
    assert_eq!((err.line, err.raid, err.turn), (3, 1, Some(1)));

    let err = fail("http://a\nturn 1:\ncharacter5.useskill(1)\nend");
    assert_eq!(err.kind, ScriptErrorKind::InvalidCharacterIndex { value: "5".into() });

    let err = fail("turn 1:\ncharacter1.useskill(0)\nend");
    assert_eq!(err.kind, ScriptErrorKind::InvalidSkillIndex { value: "0".into() });

    let err = fail("turn 1:\ncharacter1.useskill(1).target(7)\nend");
    assert_eq!(err.kind, ScriptErrorKind::InvalidTargetIndex { value: "7".into() });

    let err = fail("turn 1:\ncharacter1.useskill(1).guard\nend");
    assert_eq!(err.kind, ScriptErrorKind::UnknownChainSegment { segment: "guard".into() });

    let err = fail("turn 1:\ncharacterone\nend");
    assert_eq!(err.kind, ScriptErrorKind::InvalidCharacterIndex { value: "one".into() });

    let err = fail("turn 1:\ncharacter1.useskill(x)\nend");
    assert_eq!(err.kind, ScriptErrorKind::InvalidSkillIndex { value: "x".into() });
    assert_eq!(
        err.to_string(),
        "line 2 (raid 1, turn 1): skill number must be 1-4, got 'x': 'character1.useskill(x)'"
    );

    let err = fail("turn 1:\ncharacter2.target(x)\nend");
    assert_eq!(err.kind, ScriptErrorKind::TargetWithoutSkillArmed);

    let err = fail("turn 1:\ncharacter1.useskill(1).\nend");
    assert_eq!(err.kind, ScriptErrorKind::MalformedCharacterChain);
}

#[test]
fn turn_and_field_errors() {
    assert_eq!(
        fail("turn 1:\nsummon9\nend").kind,
        ScriptErrorKind::InvalidSummonIndex { value: "9".into() }
    );
    assert_eq!(fail("turn 1:\nwait()\nend").kind, ScriptErrorKind::MalformedWait);
    assert_eq!(fail("turn:\nend").kind, ScriptErrorKind::InvalidTurnNumber);
    assert_eq!(
        fail("http://a\nrepeat:0").kind,
        ScriptErrorKind::MalformedRepeatValue { value: "0".into() }
    );
}

#[test]
fn error_in_later_raid_reports_its_id() {
    let err = fail("http://a\nturn 1:\nattack\nend\nhttp://b\nhttp://c\nturn 2:\nsummon0\nend");
    assert_eq!((err.line, err.raid, err.turn), (8, 3, Some(2)));
    assert_eq!(
        err.to_string(),
        "line 8 (raid 3, turn 2): summon number must be 1-6, got '0': 'summon0'"
    );
}

#[test]
fn unknown_lines_never_halt_lenient_compilation() {
    let script = compile_script("garbage\nhttp://a\nnonsense here\nturn 1:\nattack\nend\n???").expect("lenient");
    assert_eq!(script.len(), 1);
    assert_eq!(script.get(1).map(|r| r.action_count()), Some(1));
}

#[test]
fn multi_digit_numbers() {
    let script = compile_script("http://a\nrepeat:25\nturn 10:\nwait(120)\nend\nturn 2:\nattack\nend").expect("ok");
    let raid = script.get(1).expect("raid 1");
    assert_eq!(raid.info.repeat, Some(25));
    assert_eq!(raid.turns.keys().copied().collect::<Vec<_>>(), vec![2, 10]);
}
