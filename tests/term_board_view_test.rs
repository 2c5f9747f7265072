use chessy::core::display::paint_selection;
use chessy::core::{candidates, Board, Game, TurnEvent};
use chessy::term::{format_board, BoardView, ColumnOrder, Highlights, TermDisplay};
use chessy::types::{palette, Position, NUM_SQUARES};

#[test]
fn text_board_after_a_move() {
    let mut game = Game::new();
    game.select(Position::from_algebraic("e2").unwrap());
    assert!(matches!(
        game.select(Position::from_algebraic("e4").unwrap()),
        TurnEvent::Committed { .. }
    ));

    let text = format_board(game.board(), ColumnOrder::Normal);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[6], "4│        p       │4");
    assert_eq!(lines[8], "2│p p p p   p p p │2");
}

#[test]
fn board_view_frame_fits_and_shows_highlights() {
    let view = BoardView::default();
    let mut hl: Highlights = [None; NUM_SQUARES];
    let origin = Position::from_algebraic("b1").unwrap();
    hl[origin.index()] = Some(palette::SELECTED);
    for dest in candidates(&Board::new(), origin) {
        hl[dest.index()] = Some(palette::VALID_MOVE);
    }

    let fb = view.render(&Board::new(), &hl);
    let (w, h) = view.frame_size();
    assert_eq!((fb.width(), fb.height()), (w, h));

    let plain = fb.to_plain_text();
    assert_eq!(plain.lines().count(), h as usize);
    assert!(plain.lines().any(|l| l.contains("8") && l.contains('R')));
}

#[test]
fn plain_terminal_display_lists_selection() {
    let board = Board::new();
    let origin = Position::from_algebraic("b1").unwrap();
    let moves = candidates(&board, origin);

    let mut display = TermDisplay::new(Vec::new()).with_color(false);
    paint_selection(&mut display, &board, origin, &moves).unwrap();
    let out = String::from_utf8(display.into_inner()).unwrap();
    assert_eq!(out, "lit: a3:valid c3:valid b1:selected\n");
}
