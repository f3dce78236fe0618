use crate::{
    composition::model::{CompositionNode, NodeKind, TextRole},
    foundation::core::{FrameIndex, FrameRange, global_to_local},
    foundation::error::{HookreelError, HookreelResult},
    subtitles::words::pop_in_scale,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Leaf nodes active at one global frame.
pub struct EvaluatedFrame {
    /// Evaluated global frame.
    pub frame: FrameIndex,
    /// Active leaves in painter's order.
    pub nodes: Vec<ActiveNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A leaf node active at the evaluated frame.
pub struct ActiveNode {
    /// Node identifier.
    pub id: String,
    /// Node payload.
    pub kind: NodeKind,
    /// Frames elapsed since the node's own start.
    pub local_frame: FrameIndex,
    /// Display scale; words pop in, everything else is 1.0.
    pub scale: f64,
}

impl EvaluatedFrame {
    /// Active node by id.
    pub fn get(&self, id: &str) -> Option<&ActiveNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Stateless evaluator from render tree to active leaves.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(tree))]
    /// Validate `tree`, then evaluate one frame.
    pub fn eval_frame(tree: &CompositionNode, frame: FrameIndex) -> HookreelResult<EvaluatedFrame> {
        tree.validate()?;
        Self::eval_frame_unchecked(tree, frame)
    }

    /// Evaluate one frame of a tree that was already validated.
    ///
    /// A node is active only inside its own window and every ancestor's window, so a
    /// word that runs past the end of its segment is cut at the segment boundary.
    pub fn eval_frame_unchecked(
        tree: &CompositionNode,
        frame: FrameIndex,
    ) -> HookreelResult<EvaluatedFrame> {
        let root_window = tree.range();
        if !root_window.contains(frame) {
            return Err(HookreelError::evaluation(format!(
                "frame {} is out of bounds [{}, {})",
                frame.0, root_window.start.0, root_window.end.0
            )));
        }

        let mut nodes = Vec::new();
        walk(tree, FrameIndex(0), root_window, frame, &mut nodes);
        Ok(EvaluatedFrame { frame, nodes })
    }
}

fn walk(
    node: &CompositionNode,
    parent_origin: FrameIndex,
    parent_window: FrameRange,
    frame: FrameIndex,
    out: &mut Vec<ActiveNode>,
) {
    let global = node.range().to_global(parent_origin);
    let Some(window) = global.intersect(parent_window) else {
        return;
    };
    if !window.contains(frame) {
        return;
    }

    if node.kind.is_container() {
        for child in &node.children {
            walk(child, global.start, window, frame, out);
        }
        return;
    }

    let Some(local_frame) = global_to_local(frame, global.start) else {
        return;
    };
    let scale = match &node.kind {
        NodeKind::Text {
            role: TextRole::Word,
            ..
        } => pop_in_scale(local_frame),
        _ => 1.0,
    };
    out.push(ActiveNode {
        id: node.id.clone(),
        kind: node.kind.clone(),
        local_frame,
        scale,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
