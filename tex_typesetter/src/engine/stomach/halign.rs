/*! `\halign`: the alignment list maker.

An [`AlignmentListMaker`] is created with the preamble, i.e. one [`PreambleItem`] per column. Material of
the current cell goes into an embedded restricted horizontal list maker. The "pre" template of a column
is pushed to the token source when its cell starts (unless the cell starts with `\omit`); the "post"
template is pushed when the cell ends, followed by the token that ended it, which is therefore seen a
second time once the template has been processed.

At the start of every row, the next token is inspected: `\noalign`, `\crcr` and a closing brace do not
start a cell, so that `\crcr` after `\cr` does nothing and vertical material can go between the rows.

When the alignment is finished, every cell is packed to the width of its column (the widest cell in
it), with the preamble's `\tabskip` glue between the columns. A cell that spans several columns is
packed to their combined width including the glue between them; if it is wider than that, the last of
its columns grows.
*/

use crate::debug_log;
use crate::engine::fontsystem::{CharNodeFactory, FontRef};
use crate::engine::mouth::TokenSource;
use crate::engine::options::TypesetterOptions;
use crate::engine::state::modes::Mode;
use crate::engine::stomach::Collaborators;
use crate::engine::stomach::horizontal::HorizontalListMaker;
use crate::engine::stomach::listmaker::{ListMaker, unsupported};
use crate::tex::nodes::{HorizontalList, Node, NodeList, NodeTrait, VerticalList};
use crate::tex::numerics::Dimen;
use crate::tex::numerics::glue::Glue;
use crate::tex::tokens::Token;
use crate::utils::errors::TypesetterError;

/// The template of a column: `pre#post`, and the `\tabskip` glue following the column.
#[derive(Clone,Debug,PartialEq,Default)]
pub struct PreambleItem {
    pub pre:Vec<Token>,
    pub post:Vec<Token>,
    pub tabskip:Glue
}
impl PreambleItem {
    pub fn new(pre:Vec<Token>,post:Vec<Token>) -> Self {
        PreambleItem { pre, post, tabskip:Glue::ZERO }
    }
    pub fn with_tabskip(mut self,tabskip:Glue) -> Self {
        self.tabskip = tabskip;
        self
    }
}

/// A finished cell, covering `columns` columns.
#[derive(Clone,Debug,PartialEq)]
pub struct Cell {
    pub nodes:NodeList,
    pub columns:usize
}
impl Cell {
    pub fn natural_width(&self) -> Dimen { self.nodes.iter().map(|n| n.width()).sum() }
}

#[derive(Clone,Debug,PartialEq)]
pub enum Row {
    /// One entry per column; columns covered by a spanning cell, and columns after the last cell, are `None`
    Cells(Vec<Option<Cell>>),
    NoAlign(NodeList)
}

pub struct AlignmentListMaker {
    preamble:Vec<PreambleItem>,
    initial_tabskip:Glue,
    width:Option<Dimen>,
    spread:bool,
    rows:Vec<Row>,
    line:Vec<Option<Cell>>,
    widths:Vec<Dimen>,
    col:usize,
    span_start:usize,
    cell:HorizontalListMaker,
    cell_open:bool,
    omitted:bool,
    post_pending:bool
}
impl AlignmentListMaker {
    /// `width` is the `to`/`spread` specification of `\halign`. The `\tabskip` glue before the first
    /// column is taken from `options`. Looks ahead in `source` for the first cell.
    pub fn new(mut preamble:Vec<PreambleItem>,width:Option<Dimen>,spread:bool,source:&mut dyn TokenSource,options:&dyn TypesetterOptions)
        -> Result<Self,TypesetterError> {
        if preamble.is_empty() {
            log::warn!("Empty alignment preamble");
            preamble.push(PreambleItem::default());
        }
        let columns = preamble.len();
        let mut ret = AlignmentListMaker {
            preamble,
            initial_tabskip:options.glue_option("tabskip").unwrap_or(Glue::ZERO),
            width, spread,
            rows:Vec::new(),
            line:Vec::new(),
            widths:vec!(Dimen::ZERO;columns),
            col:0,
            span_start:0,
            cell:HorizontalListMaker::new_restricted(),
            cell_open:false,
            omitted:false,
            post_pending:false
        };
        ret.start_row(source)?;
        Ok(ret)
    }
    pub fn rows(&self) -> &[Row] { &self.rows }
    /// The current column (0-based)
    pub fn column(&self) -> usize { self.col }
    pub fn columns(&self) -> usize { self.preamble.len() }

    fn start_row(&mut self,source:&mut dyn TokenSource) -> Result<(),TypesetterError> {
        self.col = 0;
        self.span_start = 0;
        self.line = (0..self.columns()).map(|_| None).collect();
        self.cell_open = false;
        self.look_ahead(source)
    }
    fn look_ahead(&mut self,source:&mut dyn TokenSource) -> Result<(),TypesetterError> {
        source.skip_whitespace()?;
        match source.peek()? {
            None => Ok(()),
            Some(tk) if tk.is_cs("noalign") || tk.is_cs("crcr") || tk.is_end_group() => Ok(()),
            Some(_) => self.start_cell(source)
        }
    }
    fn start_cell(&mut self,source:&mut dyn TokenSource) -> Result<(),TypesetterError> {
        source.skip_whitespace()?;
        self.omitted = match source.get_next()? {
            Some(tk) if tk.is_cs("omit") => true,
            Some(tk) => {
                source.requeue(tk);
                false
            }
            None => false
        };
        self.cell_open = true;
        if !self.omitted {
            source.push_tokens(&self.preamble[self.col].pre);
        }
        debug_log!(trace=>"alignment cell {}{}",self.col,if self.omitted {" (omitted)"} else {""});
        Ok(())
    }
    fn ensure_cell(&mut self) -> &mut HorizontalListMaker {
        if !self.cell_open {
            self.cell_open = true;
            self.omitted = true;
        }
        &mut self.cell
    }
    // true if the post template has just been inserted in front of `token`
    fn insert_post(&mut self,token:Token,source:&mut dyn TokenSource) -> bool {
        if self.post_pending {
            self.post_pending = false;
            return false
        }
        let post = &self.preamble[self.col].post;
        if self.omitted || post.is_empty() { return false }
        source.requeue(token);
        source.push_tokens(post);
        self.post_pending = true;
        true
    }
    fn check_next_column(&self) -> Result<(),TypesetterError> {
        if self.col + 1 >= self.columns() {
            Err(TypesetterError::ExtraAlignTab { column:self.col + 1 })
        } else { Ok(()) }
    }
    fn finish_cell(&mut self) {
        let cell = Cell { nodes:self.cell.take_nodes(), columns:self.col - self.span_start + 1 };
        if cell.columns == 1 {
            let w = cell.natural_width();
            if w > self.widths[self.col] { self.widths[self.col] = w }
        }
        self.line[self.span_start] = Some(cell);
        self.cell_open = false;
    }
    fn finish_row(&mut self) {
        self.finish_cell();
        let line = std::mem::take(&mut self.line);
        self.rows.push(Row::Cells(line));
        debug_log!(debug=>"alignment row {} finished",self.rows.len());
    }

    // total width of columns `start..start + columns`, including the tabskip glue between them
    fn spanned_width(&self,start:usize,columns:usize) -> Dimen {
        let end = start + columns;
        let glue : Dimen = self.preamble[start..end - 1].iter().map(|p| p.tabskip.length).sum();
        self.widths[start..end].iter().copied().sum::<Dimen>() + glue
    }
    fn grow_for_spans(&mut self) {
        let mut spans : Vec<(usize,usize,Dimen)> = self.rows.iter().flat_map(|r| match r {
            Row::Cells(cells) => cells.iter().enumerate().filter_map(|(i,c)| match c {
                Some(c) if c.columns > 1 => Some((i,c.columns,c.natural_width())),
                _ => None
            }).collect(),
            Row::NoAlign(_) => Vec::new()
        }).collect();
        spans.sort_by_key(|(_,cols,_)| *cols);
        for (start,columns,w) in spans {
            let available = self.spanned_width(start,columns);
            if w > available {
                self.widths[start + columns - 1] += w - available;
            }
        }
    }
    fn pack_row(&self,mut cells:Vec<Option<Cell>>) -> HorizontalList {
        let mut nodes = vec!(Node::Glue(self.initial_tabskip));
        let mut i = 0;
        while i < self.columns() {
            let (content,columns) = match cells[i].take() {
                Some(c) => (c.nodes,c.columns),
                None => (Vec::new(),1)
            };
            let w = self.spanned_width(i,columns);
            nodes.push(Node::HList(HorizontalList::new(content).pack_to(w)));
            i += columns;
            nodes.push(Node::Glue(self.preamble[i - 1].tabskip));
        }
        HorizontalList::new(nodes)
    }
}
impl ListMaker for AlignmentListMaker {
    fn mode(&self) -> Mode { Mode::Alignment }
    fn add(&mut self, node: Node) -> Result<(), TypesetterError> { self.ensure_cell().add(node) }
    fn add_glue(&mut self, glue: Glue) -> Result<(), TypesetterError> { self.ensure_cell().add_glue(glue) }
    fn add_space(&mut self, options: &dyn TypesetterOptions, sf_override: Option<i64>) -> Result<(), TypesetterError> {
        self.ensure_cell().add_space(options,sf_override)
    }
    fn letter(&mut self, c: char, font: &FontRef, factory: &dyn CharNodeFactory, options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        self.ensure_cell().letter(c,font,factory,options)
    }
    fn set_spacefactor(&mut self, sf: i64) -> Result<(), TypesetterError> { self.cell.set_spacefactor(sf) }
    fn spacefactor(&self) -> Result<i64, TypesetterError> { self.cell.spacefactor() }
    fn last_node(&self) -> Option<&Node> { self.cell.last_node() }
    fn remove_last_node(&mut self) -> Option<Node> { self.cell.remove_last_node() }

    fn tab(&mut self, token: Token, source: &mut dyn TokenSource, _options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        self.check_next_column()?;
        self.ensure_cell();
        if self.insert_post(token,source) { return Ok(()) }
        self.finish_cell();
        self.col += 1;
        self.span_start = self.col;
        self.start_cell(source)
    }
    fn span(&mut self, token: Token, source: &mut dyn TokenSource, _options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        self.check_next_column()?;
        self.ensure_cell();
        if self.insert_post(token,source) { return Ok(()) }
        self.col += 1;
        self.start_cell(source)
    }
    fn cr(&mut self, token: Token, source: &mut dyn TokenSource, _options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        self.ensure_cell();
        if self.insert_post(token,source) { return Ok(()) }
        self.finish_row();
        self.start_row(source)
    }
    fn crcr(&mut self, token: Token, source: &mut dyn TokenSource, options: &dyn TypesetterOptions) -> Result<(), TypesetterError> {
        if self.cell_open { self.cr(token,source,options) } else { self.look_ahead(source) }
    }
    fn noalign(&mut self, nodes: NodeList, source: &mut dyn TokenSource) -> Result<(), TypesetterError> {
        if self.cell_open { return unsupported(Mode::Alignment,"noalign") }
        self.rows.push(Row::NoAlign(nodes));
        self.look_ahead(source)
    }
    fn close(&mut self, _collaborators: &Collaborators, _options: &dyn TypesetterOptions) -> Result<NodeList, TypesetterError> {
        if self.cell_open {
            if self.col > 0 || !self.cell.is_empty() {
                log::warn!("Missing \\cr inserted");
                self.finish_row();
            } else {
                self.cell_open = false;
            }
        }
        self.grow_for_spans();
        let natural = self.initial_tabskip.length + self.spanned_width(0,self.columns()) +
            self.preamble[self.columns() - 1].tabskip.length;
        let width = match self.width {
            Some(w) if self.spread => natural + w,
            Some(w) => w,
            None => natural
        };
        let mut nodes = Vec::new();
        for r in &self.rows {
            match r {
                Row::Cells(cells) => {
                    let row = self.pack_row(cells.clone());
                    nodes.push(Node::HList(if self.width.is_some() { row.pack_to(width) } else { row }));
                }
                Row::NoAlign(v) => nodes.extend(v.iter().cloned())
            }
        }
        debug_log!(debug=>"alignment of width {} finished",width);
        let mut table = VerticalList::new(nodes);
        table.target_width = Some(width);
        Ok(vec!(Node::VList(table)))
    }
}
