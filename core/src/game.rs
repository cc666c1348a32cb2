// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game state and the move pipeline
//!
//! [`GoGame`] owns a history [`Tree`] of [`GameNode`]s and the position
//! reached by replaying the path from the root to the tree's cursor. Moves
//! and setup batches extend the tree; navigation moves the cursor and
//! rebuilds the position by replay.

use crate::{
    board::Board,
    engine::MoveGenerator,
    group::{Group, GroupArena},
    liberties,
    node::{self, keys, GameNode},
    rules::{self, RuleValidator},
    scoring::{self, Results},
    GameError, GroupId, IllegalMoveReason, Move, NodeId, Rules, StateError, Stone, Tree, Vertex,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Board, groups and capture log reached at the cursor
#[derive(Debug, Clone)]
struct Position {
    board: Board,
    groups: GroupArena,
    /// Occupied point to owning group
    group_map: HashMap<Vertex, GroupId>,
    /// Stones captured at each depth of the current path
    captured: BTreeMap<usize, Vec<Move>>,
    /// Stone whose immediate recapture is forbidden
    ko_point: Option<Move>,
}

impl Position {
    fn new(board: Board) -> Self {
        Self {
            board,
            groups: GroupArena::new(),
            group_map: HashMap::new(),
            captured: BTreeMap::new(),
            ko_point: None,
        }
    }

    fn reset(&mut self) {
        self.board.clear();
        self.groups = GroupArena::new();
        self.group_map.clear();
        self.captured.clear();
        self.ko_point = None;
    }

    fn validator(&self, rules: Rules) -> RuleValidator<'_> {
        RuleValidator::new(
            &self.board,
            &self.groups,
            &self.group_map,
            self.ko_point,
            rules,
        )
    }

    /// Put a stone on an empty point, merge its group and resolve captures
    ///
    /// Returns the number of opponent stones captured.
    fn place(
        &mut self,
        vertex: Vertex,
        stone: Stone,
        depth: usize,
        rules: Rules,
        track_ko: bool,
    ) -> usize {
        let adjacency = rules::adjacent_groups(&self.board, &self.group_map, vertex, stone);
        let surrounded = self
            .board
            .neighbors(vertex)
            .iter()
            .all(|&n| self.board.get(n) == stone.opponent());

        self.board.play_stone(vertex, stone);

        let own = if adjacency.ours.is_empty() {
            self.groups.insert(Group::new(vertex, stone))
        } else {
            let fused: Vec<Group> = adjacency
                .ours
                .iter()
                .filter_map(|&id| self.groups.remove(id))
                .collect();
            self.groups.insert(Group::merge(vertex, stone, &fused))
        };
        if let Some(group) = self.groups.get(own) {
            for v in group.stones() {
                self.group_map.insert(v, own);
            }
        }

        self.ko_point = None;
        let mut captured = 0;
        let mut ko_candidate = None;

        for id in adjacency.theirs {
            let Some(group) = self.groups.get(id) else {
                continue;
            };
            if !liberties::get_liberties(group, &self.board).is_empty() {
                continue;
            }
            if group.len() == 1 {
                ko_candidate = group.moves().next();
            }
            captured += self.capture_group(id, depth);
        }

        let lone_stone = adjacency.ours.is_empty() && surrounded;
        if track_ko && lone_stone && captured == 1 {
            if let Some(ko) = ko_candidate {
                debug!("Ko at {} for {}", ko, ko.stone());
                self.ko_point = Some(ko);
            }
        }

        if rules.allows_self_capture() {
            let dead = self
                .groups
                .get(own)
                .is_some_and(|g| liberties::get_liberties(g, &self.board).is_empty());
            if dead {
                let lost = self.capture_group(own, depth);
                debug!("{} captured {} of its own stones", stone, lost);
            }
        }

        captured
    }

    /// Remove a group from the board and log its stones at `depth`
    fn capture_group(&mut self, id: GroupId, depth: usize) -> usize {
        let Some(group) = self.groups.remove(id) else {
            return 0;
        };
        let log = self.captured.entry(depth).or_default();
        for mv in group.moves() {
            if let Some(vertex) = mv.vertex() {
                self.group_map.remove(&vertex);
                self.board.capture_stone(vertex);
            }
            log.push(mv);
        }
        debug!("Captured {} {} stones at depth {}", group.len(), group.color(), depth);
        group.len()
    }

    /// Take a single stone off the board, splitting its group if needed
    fn remove_stone(&mut self, vertex: Vertex) {
        let Some(id) = self.group_map.remove(&vertex) else {
            return;
        };
        self.board.capture_stone(vertex);
        let Some(group) = self.groups.remove(id) else {
            return;
        };

        let mut remaining: BTreeSet<Vertex> = group.stones().filter(|&v| v != vertex).collect();
        while let Some(start) = remaining.iter().next().copied() {
            let component = liberties::get_connected_points(start, &self.board);
            for v in &component {
                remaining.remove(v);
            }
            let members: Vec<Vertex> = component.iter().copied().collect();
            let split = self
                .groups
                .insert(Group::from_component(component, group.color()));
            for v in members {
                self.group_map.insert(v, split);
            }
        }
    }

    /// Apply a whole setup batch; any ko from the previous ply lapses
    fn apply_setup_batch(
        &mut self,
        stones: &[Move],
        depth: usize,
        rules: Rules,
    ) -> Result<(), GameError> {
        self.ko_point = None;
        for &stone in stones {
            self.apply_setup(stone, depth, rules)?;
        }
        Ok(())
    }

    /// Apply one setup stone; `Empty` clears the point
    fn apply_setup(&mut self, mv: Move, depth: usize, rules: Rules) -> Result<(), GameError> {
        let Move::Place { vertex, stone } = mv else {
            return Err(GameError::illegal(mv, IllegalMoveReason::OffBoard));
        };
        if !self.board.contains(vertex) {
            return Err(GameError::illegal(mv, IllegalMoveReason::OffBoard));
        }

        let existing = self.board.get(vertex);
        if existing == stone {
            return Ok(());
        }
        if !existing.is_empty() {
            self.remove_stone(vertex);
        }
        if stone.is_empty() {
            return Ok(());
        }

        self.validator(rules)
            .check_add(mv)
            .map_err(|reason| GameError::illegal(mv, reason))?;
        self.place(vertex, stone, depth, rules, false);
        Ok(())
    }
}

/// A game of Go with its full branching history
#[derive(Debug, Clone)]
pub struct GoGame {
    rules: Rules,
    komi: f64,
    /// Consecutive passes ending at the cursor
    pass_count: u32,
    /// Score recorded when the game ended by passing
    scores: Option<Results>,
    active: Stone,
    position: Position,
    tree: Tree<GameNode>,
}

impl GoGame {
    /// Start a new game
    ///
    /// `komi` defaults to the ruleset's value. Handicap stones are placed for
    /// black as a root setup batch and white moves first.
    pub fn new(
        side: u32,
        rules: Rules,
        komi: Option<f64>,
        handicap: &[Vertex],
    ) -> Result<Self, GameError> {
        let board = Board::new(side)?;
        let komi = komi.unwrap_or_else(|| rules.default_komi());

        let mut root = GameNode::new();
        root.set_property(keys::FF, vec!["4".into()]);
        root.set_property(keys::GM, vec!["1".into()]);
        root.set_property(keys::SZ, vec![side.to_string()]);
        root.set_property(keys::RU, vec![rules.to_string()]);
        root.set_property(keys::KM, vec![komi.to_string()]);
        for &vertex in handicap {
            root.add_stone(Move::Place {
                vertex,
                stone: Stone::Black,
            });
        }
        if !root.added_stones().is_empty() {
            root.set_property(keys::HA, vec![root.added_stones().len().to_string()]);
            root.set_property(keys::PL, vec!["W".into()]);
        }

        let mut game = Self::from_parts(board, rules, komi, Tree::new(root));
        game.reset_board()?;
        info!(
            "New {}x{} game, {} rules, komi {}, {} handicap stones",
            side,
            side,
            rules,
            komi,
            handicap.len()
        );
        Ok(game)
    }

    /// Load a game from an existing history tree
    ///
    /// Size, rules and komi come from the root's `SZ`, `RU` and `KM`
    /// properties (defaults 19, Chinese and the ruleset's komi). The cursor
    /// ends at the root.
    pub fn from_history_tree(tree: Tree<GameNode>) -> Result<Self, GameError> {
        let root = tree.root();

        let side = match root.first_value(keys::SZ) {
            Some(text) => parse_size(text)?,
            None => 19,
        };
        let rules = root
            .first_value(keys::RU)
            .map(Rules::from_name)
            .unwrap_or_default();
        let komi = match root.first_value(keys::KM) {
            Some(text) => parse_komi(text)?,
            None => rules.default_komi(),
        };

        let board = Board::new(side)?;
        let mut game = Self::from_parts(board, rules, komi, tree);
        game.reset_board()?;
        debug!("Loaded {} node history on a {}x{} board", game.tree.size(), side, side);
        Ok(game)
    }

    fn from_parts(board: Board, rules: Rules, komi: f64, tree: Tree<GameNode>) -> Self {
        Self {
            rules,
            komi,
            pass_count: 0,
            scores: None,
            active: Stone::Black,
            position: Position::new(board),
            tree,
        }
    }

    // ---- legality ----

    /// Whether the active player may play `mv` now
    pub fn is_legal(&self, mv: Move) -> bool {
        match mv {
            Move::Place { .. } => self
                .position
                .validator(self.rules)
                .check_move(mv, Some(self.active))
                .is_ok(),
            Move::Pass(color) => color == self.active,
            Move::Resign(color) => !color.is_empty() && !self.is_over(),
        }
    }

    /// Whether `mv` is legal for its own color, ignoring turn order
    pub fn is_gtp_legal(&self, mv: Move) -> bool {
        match mv {
            Move::Place { .. } => self.position.validator(self.rules).check_move(mv, None).is_ok(),
            Move::Pass(color) | Move::Resign(color) => !color.is_empty(),
        }
    }

    /// Whether `mv` may be placed as a setup stone
    pub fn is_add_legal(&self, mv: Move) -> bool {
        let Some(vertex) = mv.vertex() else {
            return false;
        };
        if !self.position.board.contains(vertex) {
            return false;
        }
        if self.position.board.is_empty(vertex) {
            return self.position.validator(self.rules).check_add(mv).is_ok();
        }

        let mut trial = self.position.clone();
        trial.remove_stone(vertex);
        let validator = trial.validator(self.rules);
        validator.check_add(mv).is_ok()
    }

    /// Every legal move for the active player, passing and resigning included
    pub fn legal_moves(&self) -> Vec<Move> {
        let validator = self.position.validator(self.rules);
        let mut moves: Vec<Move> = self
            .position
            .board
            .points()
            .filter(|(_, stone)| stone.is_empty())
            .map(|(vertex, _)| Move::Place {
                vertex,
                stone: self.active,
            })
            .filter(|&mv| validator.check_move(mv, Some(self.active)).is_ok())
            .collect();
        moves.push(Move::Pass(self.active));
        moves.push(Move::Resign(self.active));
        moves
    }

    // ---- playing ----

    /// Play a move for the active player
    ///
    /// Stones and passes become a new child of the cursor (or reuse an equal
    /// one) and the cursor steps into it. Resigning only records the result.
    pub fn play_stone(&mut self, mv: Move) -> Result<(), GameError> {
        match mv {
            Move::Resign(color) => return self.resign(color),
            Move::Pass(color) if color != self.active => {
                warn!("Rejected {}: {}", mv, IllegalMoveReason::WrongColor);
                return Err(GameError::illegal(mv, IllegalMoveReason::WrongColor));
            }
            Move::Pass(_) => {}
            Move::Place { .. } => {
                let check = self
                    .position
                    .validator(self.rules)
                    .check_move(mv, Some(self.active));
                if let Err(reason) = check {
                    warn!("Rejected {}: {}", mv, reason);
                    return Err(GameError::illegal(mv, reason));
                }
            }
        }

        self.tree.insert(GameNode::from_move(mv));
        self.apply_node(false)
    }

    /// Play several moves, keeping none of them if any is illegal
    pub fn play_move_sequence(&mut self, moves: &[Move]) -> Result<(), GameError> {
        let start = self.tree.path();
        let recorded = self.tree.root().property(keys::RE).map(<[String]>::to_vec);
        for &mv in moves {
            if let Err(err) = self.play_stone(mv) {
                self.replay(&start)?;
                let root = self.tree.root_mut();
                match recorded {
                    Some(values) => root.set_property(keys::RE, values),
                    None => {
                        root.remove_property(keys::RE);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Add a batch of setup stones as one node
    ///
    /// The whole batch is checked before anything changes. Afterwards the
    /// opponent of the batch's color moves, unless the batch mixes colors.
    pub fn add_stones(&mut self, stones: &[Move]) -> Result<(), GameError> {
        let depth = self.tree.depth() + 1;

        let mut batch = self
            .tree
            .children()
            .into_iter()
            .find(|child| child.get_move().is_none())
            .cloned()
            .unwrap_or_default();
        for &stone in stones {
            batch.add_stone(stone);
        }

        let mut trial = self.position.clone();
        trial.apply_setup_batch(batch.added_stones(), depth, self.rules)?;

        self.position = trial;
        self.tree.insert(GameNode::new());
        for &stone in stones {
            self.tree.get_mut().add_stone(stone);
        }
        self.settle_after_setup();
        debug!("Added {} setup stones at depth {}", stones.len(), depth);
        Ok(())
    }

    /// Ask `generator` for the active player's move and play it
    pub fn gen_move<G>(&mut self, generator: &mut G) -> Result<Move, GameError>
    where
        G: MoveGenerator + ?Sized,
    {
        let color = self.active;
        let mv = generator.generate(self, color);
        self.play_stone(mv)?;
        debug!("Generated {} for {}", mv, color);
        Ok(mv)
    }

    fn resign(&mut self, color: Stone) -> Result<(), GameError> {
        if color.is_empty() {
            return Err(GameError::illegal(
                Move::Resign(color),
                IllegalMoveReason::WrongColor,
            ));
        }
        if self.is_over() {
            return Err(StateError::AlreadyOver.into());
        }

        let results = Results::resignation(self.rules, self.komi, color);
        self.tree
            .root_mut()
            .set_property(keys::RE, vec![results.to_string()]);
        info!("{} resigned: {}", color, results);
        Ok(())
    }

    /// Apply the node at the cursor to the position
    ///
    /// Replayed stones are checked for their own color only.
    fn apply_node(&mut self, validate: bool) -> Result<(), GameError> {
        let node = self.tree.get();
        let mv = node.get_move();
        let setup: Vec<Move> = node.added_stones().to_vec();
        let depth = self.tree.depth();

        match mv {
            Some(Move::Place { vertex, stone }) => {
                if validate {
                    let checked = Move::Place { vertex, stone };
                    self.position
                        .validator(self.rules)
                        .check_move(checked, None)
                        .map_err(|reason| GameError::illegal(checked, reason))?;
                }
                self.reopen();
                self.position.place(vertex, stone, depth, self.rules, true);
                self.active = stone.opponent();
                if let Some(color) = self.tree.get().player_override() {
                    self.active = color;
                }
            }
            Some(Move::Pass(color)) => {
                self.pass_count += 1;
                self.position.ko_point = None;
                self.active = color.opponent();
                if let Some(color) = self.tree.get().player_override() {
                    self.active = color;
                }
                if self.pass_count == 2 {
                    self.finish_by_passing();
                }
            }
            // never stored in the tree
            Some(Move::Resign(_)) => {}
            None => {
                self.position.apply_setup_batch(&setup, depth, self.rules)?;
                self.settle_after_setup();
            }
        }

        Ok(())
    }

    /// Break a run of passes, dropping the result two passes recorded
    fn reopen(&mut self) {
        self.pass_count = 0;
        if self.scores.take().is_some() {
            self.tree.root_mut().remove_property(keys::RE);
            debug!("Game reopened at move {}", self.tree.depth());
        }
    }

    fn settle_after_setup(&mut self) {
        self.reopen();
        let node = self.tree.get();
        if let Some(color) = node.setup_color() {
            self.active = color.opponent();
        }
        if let Some(color) = node.player_override() {
            self.active = color;
        }
    }

    fn finish_by_passing(&mut self) {
        let results = scoring::score_position(
            &self.position.board,
            &self.position.groups,
            &self.position.group_map,
            &self.position.captured,
            self.rules,
            self.komi,
        );
        self.tree
            .root_mut()
            .set_property(keys::RE, vec![results.to_string()]);
        info!("Game over by passing: {}", results);
        self.scores = Some(results);
    }

    // ---- navigation ----

    /// Clear the board and move the cursor to the root
    ///
    /// A result recorded by two passes is discarded.
    pub fn reset_board(&mut self) -> Result<(), GameError> {
        self.position.reset();
        self.tree.advance_to_root();
        self.pass_count = 0;
        if self.scores.take().is_some() {
            self.tree.root_mut().remove_property(keys::RE);
        }
        self.active = Stone::Black;
        self.apply_node(true)
    }

    /// Alias of [`GoGame::reset_board`]
    pub fn advance_to_root(&mut self) -> Result<(), GameError> {
        self.reset_board()
    }

    /// Undo the last `steps` plies by replaying from the root
    pub fn step_up(&mut self, steps: usize) -> Result<(), GameError> {
        if steps == 0 {
            return Ok(());
        }
        if self.tree.depth() < steps {
            return Err(StateError::CannotStepUp.into());
        }

        let mut path = self.tree.path();
        path.truncate(path.len() - steps);
        self.replay(&path)
    }

    /// Replay the first-child line from the root to its leaf
    pub fn play_default_sequence(&mut self) -> Result<(), GameError> {
        self.reset_board()?;
        while !self.tree.is_at_leaf() {
            self.tree.step_down()?;
            self.apply_node(true)?;
        }
        Ok(())
    }

    fn replay(&mut self, path: &[NodeId]) -> Result<(), GameError> {
        self.reset_board()?;
        for &id in path {
            self.tree.step_to_id(id)?;
            self.apply_node(true)?;
        }
        debug!("Replayed {} plies", path.len());
        Ok(())
    }

    /// Moves of the cursor's children
    pub fn get_branches(&self) -> Vec<Move> {
        self.tree
            .children()
            .into_iter()
            .filter_map(GameNode::get_move)
            .collect()
    }

    /// Moves from the root to the cursor
    pub fn get_move_sequence(&self) -> Vec<Move> {
        self.tree
            .sequence()
            .into_iter()
            .filter_map(GameNode::get_move)
            .collect()
    }

    /// Moves along the first-child line
    pub fn get_default_sequence(&self) -> Vec<Move> {
        self.moves_on(&self.tree.default_path())
    }

    /// Moves along every root-to-leaf line
    pub fn get_sequences(&self) -> Vec<Vec<Move>> {
        self.tree
            .leaf_paths()
            .iter()
            .map(|path| self.moves_on(path))
            .collect()
    }

    fn moves_on(&self, path: &[NodeId]) -> Vec<Move> {
        path.iter()
            .filter_map(|&id| self.tree.node(id).get_move())
            .collect()
    }

    /// Depth of the cursor; setup nodes count as plies
    pub fn move_number(&self) -> usize {
        self.tree.depth()
    }

    pub fn is_at_root(&self) -> bool {
        self.tree.is_at_root()
    }

    // ---- metadata ----

    /// Root properties overlaid with the current node's
    pub fn get_properties(&self) -> BTreeMap<String, Vec<String>> {
        let mut merged = self.tree.root().properties().clone();
        if !self.tree.is_at_root() {
            for (key, values) in self.tree.get().properties() {
                merged.insert(key.clone(), values.clone());
            }
        }
        merged
    }

    /// Set a property with a single value
    pub fn set_property(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.set_property_values(key, vec![value.to_string()])
    }

    /// Set a property
    ///
    /// Game-wide keys go to the root, the rest to the current node. `KM`,
    /// `RU` and `PL` also update the game; `SZ` cannot change.
    pub fn set_property_values(&mut self, key: &str, values: Vec<String>) -> Result<(), GameError> {
        if !node::is_valid_key(key) {
            return Err(invalid_property(key, "keys are one or two uppercase letters"));
        }
        if node::is_structural_key(key) {
            return Err(invalid_property(
                key,
                "moves and setup stones are recorded by playing and adding stones",
            ));
        }

        let first = values.first().map(String::as_str).unwrap_or("");
        match key {
            keys::SZ => return Err(StateError::ImmutableProperty(key.to_string()).into()),
            keys::KM => self.komi = parse_komi(first)?,
            keys::RU => self.rules = Rules::from_name(first),
            keys::PL => {
                self.active = Stone::from_player(first)
                    .ok_or_else(|| invalid_property(key, "expected B or W"))?;
            }
            _ => {}
        }

        if node::is_root_key(key) {
            self.tree.root_mut().set_property(key, values);
        } else {
            self.tree.get_mut().set_property(key, values);
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f64) {
        self.komi = komi;
        self.tree
            .root_mut()
            .set_property(keys::KM, vec![komi.to_string()]);
    }

    /// Player to move next
    pub fn active_player(&self) -> Stone {
        self.active
    }

    /// Override the player to move, recording it on the current node
    pub fn set_active_player(&mut self, color: Stone) -> Result<(), GameError> {
        if color.is_empty() {
            return Err(StateError::EmptyActivePlayer.into());
        }
        self.active = color;
        self.tree
            .get_mut()
            .set_property(keys::PL, vec![color.letter().to_string()]);
        Ok(())
    }

    /// Comment on the current node, empty if none
    pub fn get_comment(&self) -> String {
        self.tree
            .get()
            .property(keys::C)
            .map(|values| values.join("\n"))
            .unwrap_or_default()
    }

    pub fn set_comment(&mut self, text: &str) {
        self.tree
            .get_mut()
            .set_property(keys::C, vec![text.to_string()]);
    }

    // ---- queries ----

    /// Contents of `(x, y)`, or `None` off the board
    pub fn get_space(&self, x: u8, y: u8) -> Option<Stone> {
        let vertex = Vertex::new(x, y);
        self.position
            .board
            .contains(vertex)
            .then(|| self.position.board.get(vertex))
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    pub fn side(&self) -> u8 {
        self.position.board.side()
    }

    /// Point where the player to move may not recapture
    pub fn ko_point(&self) -> Option<Vertex> {
        self.position
            .ko_point
            .filter(|ko| ko.stone() == self.active)
            .and_then(|ko| ko.vertex())
    }

    /// Live groups on the board
    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.position.groups.iter().map(|(_, group)| group)
    }

    /// Group holding the stone at `vertex`
    pub fn group_at(&self, vertex: Vertex) -> Option<&Group> {
        self.position
            .group_map
            .get(&vertex)
            .and_then(|&id| self.position.groups.get(id))
    }

    /// Stones captured by the ply at `depth` on the current path
    pub fn captures_at(&self, depth: usize) -> &[Move] {
        self.position
            .captured
            .get(&depth)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of `color` stones captured along the current path
    pub fn prisoners(&self, color: Stone) -> usize {
        self.position
            .captured
            .values()
            .flatten()
            .filter(|mv| mv.stone() == color)
            .count()
    }

    pub fn tree(&self) -> &Tree<GameNode> {
        &self.tree
    }

    pub fn into_tree(self) -> Tree<GameNode> {
        self.tree
    }

    // ---- results ----

    /// Whether a result is recorded
    pub fn is_over(&self) -> bool {
        self.pass_count >= 2 || self.tree.root().has_property(keys::RE)
    }

    /// Score the current position; only after two consecutive passes
    pub fn score(&self) -> Result<Results, GameError> {
        if self.pass_count < 2 {
            return Err(StateError::NotScorable.into());
        }
        Ok(scoring::score_position(
            &self.position.board,
            &self.position.groups,
            &self.position.group_map,
            &self.position.captured,
            self.rules,
            self.komi,
        ))
    }

    /// Final result of a finished game
    pub fn results(&self) -> Result<Results, GameError> {
        if !self.is_over() {
            return Err(StateError::GameInProgress.into());
        }
        if self.pass_count >= 2 {
            return self.score();
        }

        let recorded = self.tree.root().first_value(keys::RE).unwrap_or("");
        let winner = recorded
            .strip_suffix("+R")
            .or_else(|| recorded.strip_suffix("+Resign"))
            .and_then(Stone::from_player);
        match winner {
            Some(winner) => Ok(Results::resignation(self.rules, self.komi, winner.opponent())),
            None => Err(StateError::NotScorable.into()),
        }
    }
}

fn invalid_property(key: &str, reason: &str) -> GameError {
    GameError::InvalidProperty {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Board side from an `SZ` value; `"19"` and `"19:19"` are accepted
fn parse_size(text: &str) -> Result<u32, GameError> {
    let mut parts = text.split(':').map(str::trim);
    let cols = parts.next().unwrap_or("");
    let side: u32 = cols
        .parse()
        .map_err(|_| invalid_property(keys::SZ, "expected a number"))?;
    match parts.next() {
        Some(rows) if rows.parse::<u32>().ok() != Some(side) => {
            Err(invalid_property(keys::SZ, "boards must be square"))
        }
        _ => Ok(side),
    }
}

/// Komi from a `KM` value; an empty value means no komi
fn parse_komi(text: &str) -> Result<f64, GameError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0.0);
    }
    text.parse()
        .map_err(|_| invalid_property(keys::KM, "expected a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(x: u8, y: u8) -> Move {
        Move::place(x, y, Stone::Black)
    }

    fn w(x: u8, y: u8) -> Move {
        Move::place(x, y, Stone::White)
    }

    #[test]
    fn size_values() {
        assert_eq!(parse_size("19"), Ok(19));
        assert_eq!(parse_size("13:13"), Ok(13));
        assert!(parse_size("13:9").is_err());
        assert!(parse_size("big").is_err());
    }

    #[test]
    fn komi_values() {
        assert_eq!(parse_komi(""), Ok(0.0));
        assert_eq!(parse_komi(" 6.5 "), Ok(6.5));
        assert!(parse_komi("x").is_err());
    }

    #[test]
    fn removing_a_setup_stone_splits_its_group() {
        let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
        game.add_stones(&[b(0, 0), b(1, 0), b(2, 0)]).unwrap();
        assert_eq!(game.group_at(Vertex::new(0, 0)).map(Group::len), Some(3));

        game.add_stones(&[Move::place(1, 0, Stone::Empty)]).unwrap();
        assert_eq!(game.get_space(1, 0), Some(Stone::Empty));
        assert_eq!(game.group_at(Vertex::new(0, 0)).map(Group::len), Some(1));
        assert_eq!(game.group_at(Vertex::new(2, 0)).map(Group::len), Some(1));
        assert_eq!(game.groups().count(), 2);
    }

    #[test]
    fn ko_point_is_reported_to_the_blocked_player() {
        let mut game = GoGame::new(9, Rules::Chinese, None, &[]).unwrap();
        game.play_move_sequence(&[
            b(1, 0),
            w(2, 0),
            b(0, 1),
            w(3, 1),
            b(1, 2),
            w(2, 2),
            b(4, 4),
            w(1, 1),
        ])
        .unwrap();
        // black captures the white stone at (1,1) by playing (2,1)
        game.play_stone(b(2, 1)).unwrap();
        assert_eq!(game.get_space(1, 1), Some(Stone::Empty));
        assert_eq!(game.ko_point(), Some(Vertex::new(1, 1)));
        assert!(!game.is_legal(w(1, 1)));

        game.play_stone(w(6, 6)).unwrap();
        assert_eq!(game.ko_point(), None);
    }
}
