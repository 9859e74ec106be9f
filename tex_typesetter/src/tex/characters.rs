/*! Data structures for reading input text. */

/// A single line of characters, without its line terminator.
pub type TextLine = Box<[char]>;

/// A source of lines of characters, e.g. a file or a string.
pub trait TextLineSource {
    /// returns the next line of characters, or `None` if there are no more lines.
    fn get_line(&mut self) -> Option<TextLine>;
    /// A description of this source for error messages, e.g. a file name.
    fn source_name(&self) -> &str { "" }
}

/// A source of lines of characters generated from a string.
#[derive(Clone,Debug)]
pub struct StringLineSource {
    lines:std::vec::IntoIter<TextLine>,
    name:String
}
impl StringLineSource {
    /// Split a string into [`TextLine`]s: at `\n` or `\r\n`, removing trailing spaces.
    pub fn make_lines<I:Iterator<Item=char>>(iter:I) -> Vec<TextLine> {
        let mut lines = Vec::new();
        let mut curr = Vec::new();
        for c in iter {
            if c == '\n' {
                Self::trim(&mut curr);
                lines.push(std::mem::take(&mut curr).into());
            } else {
                curr.push(c);
            }
        }
        if !curr.is_empty() {
            Self::trim(&mut curr);
            lines.push(curr.into());
        }
        lines
    }
    fn trim(line:&mut Vec<char>) {
        if let Some('\r') = line.last() {
            line.pop();
        }
        while let Some(' ') = line.last() {
            line.pop();
        }
    }
    /// A source from already split lines; the lines are taken as they are.
    pub fn from_lines<S:AsRef<str>>(lines:&[S]) -> Self {
        lines.iter().map(|l| l.as_ref().chars().collect::<Vec<_>>().into()).collect::<Vec<TextLine>>().into()
    }
    /// Set the name reported by [`source_name`](TextLineSource::source_name).
    pub fn with_name<S:Into<String>>(mut self,name:S) -> Self {
        self.name = name.into();
        self
    }
}
impl From<Vec<TextLine>> for StringLineSource {
    fn from(lines: Vec<TextLine>) -> Self { Self { lines:lines.into_iter(), name:String::new() } }
}
impl TextLineSource for StringLineSource {
    fn get_line(&mut self) -> Option<TextLine> {
        self.lines.next()
    }
    fn source_name(&self) -> &str { &self.name }
}
impl From<&str> for StringLineSource {
    fn from(s: &str) -> Self { Self::make_lines(s.chars()).into() }
}
impl From<String> for StringLineSource {
    fn from(s: String) -> Self { Self::make_lines(s.chars()).into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines() {
        let mut src : StringLineSource = "ab  \r\ncd\n\n  e ".into();
        assert_eq!(&*src.get_line().unwrap(),&['a','b']);
        assert_eq!(&*src.get_line().unwrap(),&['c','d']);
        assert!(src.get_line().unwrap().is_empty());
        assert_eq!(&*src.get_line().unwrap(),&[' ',' ','e']);
        assert!(src.get_line().is_none());
    }

    #[test]
    fn named_lines() {
        let src = StringLineSource::from_lines(&["x ","y"]).with_name("test.tex");
        assert_eq!(src.source_name(),"test.tex");
        let lines : Vec<_> = src.lines.collect();
        assert_eq!(&*lines[0],&['x',' ']);
    }
}
