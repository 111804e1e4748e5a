use embassy_futures::{block_on, join::join};
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Channel};
use rpn_lib::{
    OUTPUT_QUEUE_SIZE, STACK_SIZE,
    calculator::Calculator,
    codes::{KeyCodes, Keystroke, RPN_KEY_BASE, RpnKey, ascii_keystroke},
    error::CalcError,
    output::{ChannelSink, KeystrokeSink, OutputChannel},
    report::KeystrokeReports,
};

#[derive(Default)]
struct Recorder {
    strokes: Vec<Keystroke>,
}

impl KeystrokeSink for Recorder {
    async fn emit_keystroke(&mut self, stroke: Keystroke) {
        self.strokes.push(stroke);
    }
}

fn decode(strokes: &[Keystroke]) -> String {
    strokes
        .iter()
        .map(|stroke| {
            (' '..='~')
                .chain(['\n'])
                .find(|&c| ascii_keystroke(c) == Some(*stroke))
                .unwrap_or('?')
        })
        .collect()
}

async fn tap(
    calc: &mut Calculator,
    sink: &mut impl KeystrokeSink,
    key: RpnKey,
) -> Result<(), CalcError> {
    let code = key as u16;
    let result = calc.on_key_event(code, true, sink).await;
    // Releases never change anything
    assert_eq!(calc.on_key_event(code, false, sink).await, Ok(()));
    result
}

async fn type_number(calc: &mut Calculator, sink: &mut impl KeystrokeSink, digits: &str) {
    for d in digits.bytes() {
        let code = RPN_KEY_BASE + (d - b'0') as u16;
        calc.on_key_event(code, true, sink).await.unwrap();
    }
    tap(calc, sink, RpnKey::Enter).await.unwrap();
}

#[test]
fn typed_values_land_on_stack() {
    let mut calc = Calculator::new();
    let mut sink = Recorder::default();
    for digits in ["0", "007", "42", "2147483647", "123456789"] {
        block_on(type_number(&mut calc, &mut sink, digits));
        assert_eq!(calc.stack().peek(), Ok(digits.parse::<i32>().unwrap()));
    }
    assert_eq!(calc.depth(), 5);
}

#[test]
fn full_session_over_channel() {
    let channel = Channel::<NoopRawMutex, Keystroke, 256>::new();
    let mut sink = ChannelSink::new(channel.sender());
    let mut calc = Calculator::new();

    block_on(async {
        type_number(&mut calc, &mut sink, "6").await;
        type_number(&mut calc, &mut sink, "7").await;
        tap(&mut calc, &mut sink, RpnKey::Mul).await.unwrap();
        tap(&mut calc, &mut sink, RpnKey::Neg).await.unwrap();
        tap(&mut calc, &mut sink, RpnKey::Peek).await.unwrap();
    });
    assert_eq!(calc.stack().as_slice(), &[-42]);

    let mut strokes = Vec::new();
    while let Ok(stroke) = channel.try_receive() {
        strokes.push(stroke);
    }
    assert_eq!(decode(&strokes), "6<\n7<\n*\n-.\n# -42\n");
    // "# -42\n" closes the transcript
    let tail: Vec<KeyCodes> = strokes[strokes.len() - 6..].iter().map(|s| s.code).collect();
    assert_eq!(
        tail,
        [
            KeyCodes::Keyboard3Hash,
            KeyCodes::KeyboardSpacebar,
            KeyCodes::KeyboardDashUnderscore,
            KeyCodes::Keyboard4Dollar,
            KeyCodes::Keyboard2At,
            KeyCodes::KeyboardEnter,
        ]
    );
    assert!(strokes[strokes.len() - 6].shift);

    let reports = KeystrokeReports::new(strokes[strokes.len() - 6]);
    assert_eq!(reports.press().modifier, 0b10);
    assert_eq!(reports.press().keycodes[0], 0x20);
}

#[test]
fn deep_list_arrives_whole_through_default_queue() {
    let channel = OutputChannel::<NoopRawMutex>::new();
    let mut sink = ChannelSink::new(channel.sender());
    let mut calc = Calculator::new();

    let mut expected = String::new();
    for i in 1..=30 {
        expected.push_str(&format!("{}<\n", i));
    }
    expected.push_str("#   begin stack dump\n");
    for i in (1..=30).rev() {
        expected.push_str(&format!("# {}\n", i));
    }
    expected.push_str("#   end stack dump\n");
    assert!(expected.len() > OUTPUT_QUEUE_SIZE);

    let session = async {
        for i in 1..=30 {
            type_number(&mut calc, &mut sink, &i.to_string()).await;
        }
        tap(&mut calc, &mut sink, RpnKey::List).await.unwrap();
    };
    let usb_task = async {
        let mut strokes = Vec::new();
        for _ in 0..expected.len() {
            strokes.push(channel.receive().await);
        }
        strokes
    };
    let ((), strokes) = block_on(join(session, usb_task));

    assert_eq!(decode(&strokes), expected);
    assert!(channel.try_receive().is_err());
    assert_eq!(calc.depth(), 30);
}

#[test]
fn pushing_past_capacity_keeps_entries() {
    let mut calc = Calculator::new();
    let mut sink = Recorder::default();
    block_on(async {
        for i in 0..STACK_SIZE {
            type_number(&mut calc, &mut sink, &(i % 10).to_string()).await;
        }
        calc.on_key_event(RpnKey::Digit5 as u16, true, &mut sink)
            .await
            .unwrap();
        assert_eq!(
            tap(&mut calc, &mut sink, RpnKey::Enter).await,
            Err(CalcError::StackOverflow)
        );
    });
    assert_eq!(calc.depth(), STACK_SIZE);
    let expected = (0..STACK_SIZE).map(|i| (i % 10) as i32);
    assert!(calc.stack().as_slice().iter().copied().eq(expected));
}

#[test]
fn operator_after_dropped_commit_still_runs() {
    let mut calc = Calculator::new();
    let mut sink = Recorder::default();
    block_on(async {
        for _ in 0..STACK_SIZE {
            type_number(&mut calc, &mut sink, "8").await;
        }
        sink.strokes.clear();
        calc.on_key_event(RpnKey::Digit9 as u16, true, &mut sink)
            .await
            .unwrap();
        assert_eq!(
            tap(&mut calc, &mut sink, RpnKey::Pop).await,
            Err(CalcError::StackOverflow)
        );
    });
    assert_eq!(decode(&sink.strokes), "9# stack full\n> 8\n");
    assert_eq!(calc.depth(), STACK_SIZE - 1);
}

#[test]
fn errors_never_mutate_stack() {
    let mut calc = Calculator::new();
    let mut sink = Recorder::default();
    block_on(async {
        type_number(&mut calc, &mut sink, "5").await;
        type_number(&mut calc, &mut sink, "0").await;
        assert_eq!(
            tap(&mut calc, &mut sink, RpnKey::Div).await,
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(calc.stack().as_slice(), &[5, 0]);

        tap(&mut calc, &mut sink, RpnKey::Pop).await.unwrap();
        tap(&mut calc, &mut sink, RpnKey::Pop).await.unwrap();
        for key in [RpnKey::Add, RpnKey::Sub, RpnKey::Mul, RpnKey::Div, RpnKey::Dup, RpnKey::Neg] {
            assert!(matches!(
                tap(&mut calc, &mut sink, key).await,
                Err(CalcError::StackUnderflow { .. })
            ));
            assert_eq!(calc.depth(), 0);
        }
        for key in [RpnKey::Pop, RpnKey::Peek, RpnKey::List] {
            assert_eq!(tap(&mut calc, &mut sink, key).await, Err(CalcError::EmptyStack));
        }
    });
}

#[test]
fn swap_twice_and_dup_pop_round_trip() {
    let mut calc = Calculator::new();
    let mut sink = Recorder::default();
    block_on(async {
        for digits in ["1", "2", "3"] {
            type_number(&mut calc, &mut sink, digits).await;
        }
        tap(&mut calc, &mut sink, RpnKey::Swap).await.unwrap();
        tap(&mut calc, &mut sink, RpnKey::Swap).await.unwrap();
        assert_eq!(calc.stack().as_slice(), &[1, 2, 3]);
        tap(&mut calc, &mut sink, RpnKey::Dup).await.unwrap();
        tap(&mut calc, &mut sink, RpnKey::Pop).await.unwrap();
    });
    assert_eq!(calc.stack().as_slice(), &[1, 2, 3]);
}
