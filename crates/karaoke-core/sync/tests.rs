//! State machine tests: line window, paragraph transitions and highlights

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Marks `start, start + step, ...`, `count` of them
fn spaced_marks(start: Millis, step: Millis, count: u32) -> Vec<Millis> {
    (0..count).map(|index| start + index * step).collect()
}

fn rows(descriptor: &RenderDescriptor) -> Vec<(usize, usize)> {
    descriptor
        .lines
        .iter()
        .map(|line| (line.row, line.line))
        .collect()
}

#[test]
fn empty_lyric_shows_nothing() {
    let descriptor = evaluate(&Lyrics::new(""), &[], 1_000, &SyncConfig::default());
    assert_eq!(descriptor, RenderDescriptor::empty(1_000));
}

#[test]
fn three_line_paragraph_window() {
    let lyrics = Lyrics::new("abc\nde\nfgh");
    let marks = spaced_marks(0, 10, 9);
    let config = SyncConfig::default();
    assert_eq!(lyrics.required_mark_count(), 9);

    let early = evaluate(&lyrics, &marks, 25, &config);
    assert_eq!(early.visible_lines, [Some(0), Some(1)]);

    let middle = evaluate(&lyrics, &marks, 55, &config);
    let late = evaluate(&lyrics, &marks, 95, &config);
    assert_eq!(middle.visible_lines, [Some(2), Some(1)]);
    assert_eq!(late.visible_lines, middle.visible_lines);
    assert!(middle.should_show_text);
    assert!(late.should_show_text);
    assert_eq!(rows(&middle), vec![(0, 2), (1, 1)]);
}

#[test]
fn ready_dots_before_first_word() {
    let lyrics = Lyrics::new("abc\nde\nfgh");
    let marks = spaced_marks(3_000, 10, 9);
    let config = SyncConfig::default();

    let dots = evaluate(&lyrics, &marks, 1_500, &config)
        .ready_dots
        .expect("inside pre-roll window");
    assert_eq!(dots.line, 0);
    assert_eq!(dots.count, 4);
    assert!((dots.progress - 0.5).abs() < 1e-6);

    assert!(evaluate(&lyrics, &marks, 3_000, &config).ready_dots.is_none());

    let shifted = spaced_marks(5_000, 10, 9);
    let before_window = evaluate(&lyrics, &shifted, 1_000, &config);
    assert!(before_window.ready_dots.is_none());
    assert!(before_window.should_show_text);
}

#[test]
fn paragraph_lingers_then_hides_then_next_prerolls() {
    let lyrics = Lyrics::new("ab\ncd\n\nef");
    let marks = [1_000, 1_100, 1_200, 1_300, 1_400, 10_000, 10_100, 10_200];
    let config = SyncConfig::default();

    let lingering = evaluate(&lyrics, &marks, 1_450, &config);
    assert!(lingering.should_show_text);
    assert_eq!(lingering.visible_lines, [Some(0), Some(1)]);
    assert_eq!(lingering.highlight_of(4), Some(1.0));
    assert!(lingering.ready_dots.is_none());

    let gone = evaluate(&lyrics, &marks, 5_000, &config);
    assert!(!gone.should_show_text);
    assert!(gone.lines.is_empty());
    assert_eq!(gone.visible_lines, [Some(0), Some(1)]);

    let preroll = evaluate(&lyrics, &marks, 8_500, &config);
    assert!(preroll.should_show_text);
    assert_eq!(preroll.visible_lines, [Some(2), None]);
    let dots = preroll.ready_dots.expect("next paragraph pre-roll");
    assert_eq!(dots.line, 2);
    assert!((dots.progress - 0.5).abs() < 1e-6);

    let singing = evaluate(&lyrics, &marks, 10_150, &config);
    assert!(singing.ready_dots.is_none());
    assert_eq!(singing.highlight_of(6), Some(1.0));
    assert_eq!(singing.highlight_of(7), Some(0.5));

    let finished = evaluate(&lyrics, &marks, 12_300, &config);
    assert!(!finished.should_show_text);
}

#[test]
fn short_gap_switches_straight_into_preroll() {
    let lyrics = Lyrics::new("ab\ncd\n\nef");
    let marks = [1_000, 1_100, 1_200, 1_300, 1_400, 2_000, 2_100, 2_200];
    let config = SyncConfig::default();

    let still_singing = evaluate(&lyrics, &marks, 1_350, &config);
    assert_eq!(still_singing.visible_lines, [Some(0), Some(1)]);

    let switched = evaluate(&lyrics, &marks, 1_450, &config);
    assert_eq!(switched.visible_lines, [Some(2), None]);
    assert!(switched.ready_dots.is_some());
}

#[test]
fn missing_marks_stop_the_walk() {
    let lyrics = Lyrics::new("ab\ncd\nef");
    let config = SyncConfig::default();

    let partial = evaluate(&lyrics, &[0, 10, 20], 1_000, &config);
    assert_eq!(partial.visible_lines, [Some(2), Some(1)]);
    assert!(partial.should_show_text);
    assert_eq!(partial.highlight_of(3), Some(0.0));
    assert_eq!(partial.highlight_of(6), Some(0.0));
    assert_eq!(partial.highlight_of(0), None);

    let unmarked = evaluate(&lyrics, &[], 500, &config);
    assert_eq!(unmarked.visible_lines, [Some(0), Some(1)]);
    assert!(unmarked
        .lines
        .iter()
        .flat_map(|line| &line.tokens)
        .all(|token| token.ratio == 0.0));
}

#[test]
fn surplus_marks_are_ignored() {
    let lyrics = Lyrics::new("ab");
    let config = SyncConfig::default();
    let exact = evaluate(&lyrics, &[0, 10, 20], 15, &config);
    let surplus = evaluate(&lyrics, &[0, 10, 20, 30, 40], 15, &config);
    assert_eq!(exact, surplus);
}

#[test]
fn zero_length_word_steps() {
    let lyrics = Lyrics::new("ab");
    let marks = [0, 100, 100];
    let config = SyncConfig::default();
    assert_eq!(evaluate(&lyrics, &marks, 99, &config).highlight_of(1), Some(0.0));
    assert_eq!(evaluate(&lyrics, &marks, 100, &config).highlight_of(1), Some(1.0));
}

#[test]
fn breaks_only_lyric_has_empty_lines() {
    let lyrics = Lyrics::new("\n");
    let descriptor = evaluate(&lyrics, &[], 0, &SyncConfig::default());
    assert_eq!(descriptor.visible_lines, [Some(0), Some(1)]);
    assert!(descriptor.lines.iter().all(|line| line.tokens.is_empty()));
}

#[test]
fn linked_words_are_wider() {
    let lyrics = Lyrics::new("a'bc");
    let descriptor = evaluate(&lyrics, &[0, 10, 20], 5, &SyncConfig::default());
    let widths: Vec<f32> = descriptor.lines[0]
        .tokens
        .iter()
        .map(|token| token.width)
        .collect();
    assert_eq!(widths, vec![1.5, 1.0]);
    assert_eq!(descriptor.lines[0].highlighted_width(), 0.75);
}

#[test]
fn lower_row_is_indented() {
    let lyrics = Lyrics::new("ab\ncd");
    let config = SyncConfig::default().with_line_geometry(1.5, 0.25);
    let descriptor = evaluate(&lyrics, &[0, 10, 20, 30, 40], 0, &config);
    let lower = descriptor.line_in_row(1).expect("second row");
    assert_eq!(lower.line, 1);
    assert_eq!(lower.x_offset, 0.25);
    assert_eq!(lower.y_offset, 1.5);
    let upper = descriptor.line_in_row(0).expect("first row");
    assert_eq!((upper.x_offset, upper.y_offset), (0.0, 0.0));
}

#[test]
fn visible_lines_carry_paragraph_relative_index() {
    let lyrics = Lyrics::new("a\nb\nc\n\nd\ne\nf");
    let marks = spaced_marks(1_000, 100, 8);
    let config = SyncConfig::default();

    // first line of the second paragraph sung, its third line moves up
    let descriptor = evaluate(&lyrics, &marks, 1_550, &config);
    assert_eq!(descriptor.visible_lines, [Some(5), Some(4)]);
    let relative: Vec<(usize, usize)> = descriptor
        .lines
        .iter()
        .map(|line| (line.line, line.paragraph_line))
        .collect();
    assert_eq!(relative, vec![(5, 2), (4, 1)]);
    for line in &descriptor.lines {
        assert_eq!(
            lyrics.layout().paragraph_relative_line(line.line),
            Some(line.paragraph_line)
        );
        assert_eq!(line.row, line.paragraph_line % 2);
    }
}

#[test]
fn rows_follow_paragraph_parity() {
    // second paragraph starts on an odd global line
    let lyrics = Lyrics::new("a\n\nb\nc");
    let marks = [0, 10, 20, 30, 40];
    let descriptor = evaluate(&lyrics, &marks, 25, &SyncConfig::default());
    assert_eq!(rows(&descriptor), vec![(0, 1), (1, 2)]);
}

#[test]
fn query_order_does_not_matter() {
    let lyrics = Lyrics::new("ab\ncd\n\nef\ngh");
    let marks = spaced_marks(4_000, 250, 11);
    let config = SyncConfig::default();
    let times = [9_000, 0, 4_600, 7_500, 4_100, 12_000, 5_200];

    let forward: Vec<_> = times
        .iter()
        .map(|&time| evaluate(&lyrics, &marks, time, &config))
        .collect();
    let backward: Vec<_> = times
        .iter()
        .rev()
        .map(|&time| evaluate(&lyrics, &marks, time, &config))
        .rev()
        .collect();
    assert_eq!(forward, backward);
}

fn ascending_marks() -> impl Strategy<Value = Vec<Millis>> {
    prop::collection::vec(0u32..300, 0..40).prop_map(|steps| {
        steps
            .into_iter()
            .scan(0, |total, step| {
                *total += step;
                Some(*total)
            })
            .collect()
    })
}

/// Two to four paragraphs of one to three short lines each
fn paragraph_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec("[ab]{1,4}", 1..4), 2..5).prop_map(|paragraphs| {
        paragraphs
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    })
}

fn focused_paragraph(lyrics: &Lyrics, descriptor: &RenderDescriptor) -> Option<usize> {
    descriptor.visible_lines[0].map(|line| lyrics.lines()[line].paragraph)
}

proptest! {
    #[test]
    fn paragraph_handover_keeps_text_on_screen(
        text in paragraph_text(),
        steps in prop::collection::vec(1u32..2_000, 64),
        disappear in 0u32..3_000,
        ready in 1u32..3_000,
    ) {
        let lyrics = Lyrics::new(&text);
        let marks: Vec<Millis> = steps
            .iter()
            .take(lyrics.required_mark_count())
            .scan(5_000, |total, step| {
                *total += step;
                Some(*total)
            })
            .collect();
        prop_assert_eq!(marks.len(), lyrics.required_mark_count());
        let config = SyncConfig::default()
            .with_disappear_period(disappear)
            .with_ready_dots_period(ready);
        let paragraphs = lyrics.paragraphs();

        // focus only changes at these instants
        let mut edges = marks.clone();
        for (index, paragraph) in paragraphs.iter().enumerate() {
            edges.push(marks[paragraph.words_end_mark] + disappear);
            if let Some(next) = paragraphs.get(index + 1) {
                edges.push(marks[next.start_mark].saturating_sub(ready));
            }
        }
        let mut samples: Vec<Millis> = edges
            .iter()
            .flat_map(|&edge| [edge.saturating_sub(1), edge])
            .collect();
        samples.sort_unstable();
        samples.dedup();

        let mut previous: Option<usize> = None;
        for &time in &samples {
            let descriptor = evaluate(&lyrics, &marks, time, &config);
            let focus = focused_paragraph(&lyrics, &descriptor);
            prop_assert!(focus.is_some(), "nothing focused at {}", time);
            let focus = focus.unwrap();

            if let Some(before) = previous {
                prop_assert!(before <= focus, "focus went back at {}", time);
                if focus == before + 1 {
                    let words_end = marks[paragraphs[before].words_end_mark];
                    let next_start = marks[paragraphs[focus].start_mark];
                    prop_assert!(
                        time < words_end + disappear || time >= next_start.saturating_sub(ready),
                        "paragraph {} handed over at {} outside its linger and pre-roll windows",
                        before,
                        time
                    );
                }
            }
            previous = Some(focus);
        }

        for paragraph in paragraphs {
            let words_end = marks[paragraph.words_end_mark];
            let lingering = words_end..words_end + disappear;
            for time in [words_end, words_end + disappear / 2, (words_end + disappear).saturating_sub(1)] {
                if lingering.contains(&time) {
                    let descriptor = evaluate(&lyrics, &marks, time, &config);
                    prop_assert!(descriptor.should_show_text, "text hidden at {} while lingering", time);
                }
            }
        }
    }

    #[test]
    fn highlight_and_dots_stay_in_unit_range(
        text in "[ab'\n]{0,24}",
        marks in ascending_marks(),
        time in 0u32..15_000,
    ) {
        let lyrics = Lyrics::new(&text);
        let descriptor = evaluate(&lyrics, &marks, time, &SyncConfig::default());
        for token in descriptor.lines.iter().flat_map(|line| &line.tokens) {
            prop_assert!((0.0..=1.0).contains(&token.ratio));
        }
        if let Some(dots) = descriptor.ready_dots {
            prop_assert!((0.0..=1.0).contains(&dots.progress));
        }
    }

    #[test]
    fn line_slots_never_move_backwards(
        text in "[ab'\n]{0,24}",
        marks in ascending_marks(),
        mut times in prop::collection::vec(0u32..15_000, 1..20),
    ) {
        let lyrics = Lyrics::new(&text);
        let config = SyncConfig::default().with_disappear_period(500);
        times.sort_unstable();

        let mut seen: [Option<usize>; 2] = [None, None];
        for time in times {
            let descriptor = evaluate(&lyrics, &marks, time, &config);
            for (slot, value) in descriptor.visible_lines.iter().enumerate() {
                if let Some(line) = *value {
                    prop_assert!(seen[slot].map_or(true, |previous| previous <= line));
                    seen[slot] = Some(line);
                }
            }
        }
    }

    #[test]
    fn visible_lines_share_one_paragraph(
        text in "[ab\n]{0,24}",
        marks in ascending_marks(),
        time in 0u32..15_000,
    ) {
        let lyrics = Lyrics::new(&text);
        let descriptor = evaluate(&lyrics, &marks, time, &SyncConfig::default());
        let paragraphs: Vec<usize> = descriptor.lines.iter().map(|line| line.paragraph).collect();
        prop_assert!(paragraphs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
