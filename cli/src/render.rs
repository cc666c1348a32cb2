// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use sente_core::{GoGame, Stone, Vertex};

/// Render the game board as ASCII art, row 1 at the bottom
pub fn render_board(game: &GoGame) -> String {
    let board = game.board();
    let size = board.side();
    let ko = game.ko_point();
    let mut output = String::new();

    let labels = column_labels(size);
    output.push_str(&labels);

    for y in 0..size {
        let row = size - y;
        output.push_str(&format!("{:2} ", row));

        for x in 0..size {
            let vertex = Vertex::new(x, y);
            let symbol = match board.get(vertex) {
                Stone::Black => "●",
                Stone::White => "○",
                Stone::Empty if ko == Some(vertex) => "×",
                Stone::Empty if is_star_point(vertex, size) => "+",
                Stone::Empty => "·",
            };
            output.push_str(&format!(" {}", symbol));
        }

        output.push_str(&format!(" {}", row));
        output.push('\n');
    }

    output.push_str(&labels);
    output
}

fn column_labels(size: u8) -> String {
    let mut line = String::from("   ");
    for col in 0..size {
        line.push(' ');
        line.push(coord_to_column_char(col));
    }
    line.push('\n');
    line
}

/// Convert a column index to a column character (A-T, skipping I)
fn coord_to_column_char(col: u8) -> char {
    if col < 8 {
        (b'A' + col) as char
    } else {
        (b'A' + col + 1) as char
    }
}

/// Check if a point is a star point on the board
fn is_star_point(vertex: Vertex, board_size: u8) -> bool {
    let (x, y) = (vertex.x, vertex.y);

    match board_size {
        9 => matches!((x, y), (2, 2) | (2, 6) | (4, 4) | (6, 2) | (6, 6)),
        13 => matches!((x, y), (3, 3) | (3, 9) | (6, 6) | (9, 3) | (9, 9)),
        19 => matches!(x, 3 | 9 | 15) && matches!(y, 3 | 9 | 15),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sente_core::{Move, Rules};

    #[test]
    fn test_render_empty_9x9_board() {
        let game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
        let output = render_board(&game);

        assert!(output.contains("A B C D E F G H J"));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 11); // 2 label rows + 9 board rows
        assert!(lines[1].starts_with(" 9 "));
        assert!(lines[9].starts_with(" 1 "));
        assert_eq!(output.matches('+').count(), 5);
    }

    #[test]
    fn test_render_board_with_stones() {
        let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
        game.play_stone(Move::place(4, 4, Stone::Black)).unwrap();
        game.play_stone(Move::place(0, 8, Stone::White)).unwrap();

        let output = render_board(&game);
        let lines: Vec<&str> = output.lines().collect();

        // White on A1, the bottom-left corner
        assert!(lines[9].starts_with(" 1  ○"));
        assert!(lines[5].contains("●"));
        assert_eq!(output.matches('+').count(), 4);
    }

    #[test]
    fn test_coord_to_column_char() {
        assert_eq!(coord_to_column_char(0), 'A');
        assert_eq!(coord_to_column_char(7), 'H');
        assert_eq!(coord_to_column_char(8), 'J'); // Skip 'I'
        assert_eq!(coord_to_column_char(18), 'T');
    }

    #[test]
    fn test_star_points() {
        assert!(is_star_point(Vertex::new(4, 4), 9));
        assert!(is_star_point(Vertex::new(2, 2), 9));
        assert!(!is_star_point(Vertex::new(0, 0), 9));

        assert!(is_star_point(Vertex::new(9, 9), 19));
        assert!(is_star_point(Vertex::new(15, 3), 19));
        assert!(!is_star_point(Vertex::new(0, 0), 19));
    }
}
