//! Vertical and internal vertical mode.

use crate::debug_log;
use crate::engine::options::TypesetterOptions;
use crate::engine::state::modes::Mode;
use crate::engine::stomach::Collaborators;
use crate::engine::stomach::listmaker::ListMaker;
use crate::tex::nodes::{Node, NodeList, NodeTrait};
use crate::tex::numerics::Dimen;
use crate::tex::numerics::glue::Glue;
use crate::utils::errors::TypesetterError;

/// The glue between a box of depth `prevdepth` and the following box of height `height`:
/// `\baselineskip` minus both, or `\lineskip` if that is less than `\lineskiplimit`.
pub fn baseline_glue(prevdepth:Dimen,height:Dimen,options:&dyn TypesetterOptions) -> Glue {
    let baselineskip = options.glue_option("baselineskip").unwrap_or(Glue::ZERO);
    let length = baselineskip.length - prevdepth - height;
    if length < options.dimen_option("lineskiplimit").unwrap_or(Dimen::ZERO) {
        options.glue_option("lineskip").unwrap_or(Glue::ZERO)
    } else {
        Glue { length, ..baselineskip }
    }
}

/// Appends `nodes` to `list`, putting [`baseline_glue`] before every horizontal box unless `prevdepth`
/// is `None`. Updates `prevdepth` to the depth of the last box.
pub fn append_adjusted(list:&mut NodeList,prevdepth:&mut Option<Dimen>,nodes:NodeList,options:&dyn TypesetterOptions) {
    for n in nodes {
        if let Node::HList(b) = &n {
            if let Some(pd) = *prevdepth {
                let glue = baseline_glue(pd,b.height(),options);
                debug_log!(trace=>"baseline glue {}",glue);
                list.push(Node::Glue(glue));
            }
            *prevdepth = Some(b.depth());
        }
        list.push(n);
    }
}

/// The list maker of vertical mode, and of internal vertical mode (in `\vbox`es).
pub struct VerticalListMaker {
    inner:bool,
    nodes:NodeList,
    prevdepth:Option<Dimen>
}
impl VerticalListMaker {
    /// The main vertical list
    pub fn new() -> Self { VerticalListMaker { inner:false, nodes:Vec::new(), prevdepth:None } }
    /// The list of a `\vbox`
    pub fn new_inner() -> Self { VerticalListMaker { inner:true, ..Self::new() } }
    pub fn nodes(&self) -> &[Node] { &self.nodes }
}
impl ListMaker for VerticalListMaker {
    fn mode(&self) -> Mode {
        if self.inner { Mode::InnerVertical } else { Mode::Vertical }
    }
    fn add(&mut self, node: Node) -> Result<(), TypesetterError> {
        match &node {
            Node::HList(_) | Node::VList(_) => self.prevdepth = Some(node.depth()),
            Node::Rule{..} => self.prevdepth = None,
            _ => ()
        }
        self.nodes.push(node);
        Ok(())
    }
    fn add_glue(&mut self, glue: Glue) -> Result<(), TypesetterError> {
        self.nodes.push(Node::Glue(glue));
        Ok(())
    }
    // spaces are ignored in vertical mode
    fn add_space(&mut self, _options: &dyn TypesetterOptions, _sf_override: Option<i64>) -> Result<(), TypesetterError> {
        Ok(())
    }
    fn set_prevdepth(&mut self, pd: Option<Dimen>) -> Result<(), TypesetterError> {
        self.prevdepth = pd;
        Ok(())
    }
    fn prevdepth(&self) -> Result<Option<Dimen>, TypesetterError> { Ok(self.prevdepth) }
    fn last_node(&self) -> Option<&Node> { self.nodes.last() }
    fn remove_last_node(&mut self) -> Option<Node> { self.nodes.pop() }
    fn add_and_adjust(&mut self, nodes: NodeList, options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        append_adjusted(&mut self.nodes,&mut self.prevdepth,nodes,options);
        Ok(())
    }
    fn close(&mut self, _collaborators: &Collaborators, _options: &dyn TypesetterOptions) -> Result<NodeList, TypesetterError> {
        Ok(self.nodes.clone())
    }
}
