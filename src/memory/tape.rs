/// Cells per page
pub const PAGE_SIZE: usize = 256;

type Page = [u8; PAGE_SIZE];

/// Where a page lives: `Back(n)` is page `n`, `Front(n)` is page `-(n + 1)`.
///
/// Both halves only ever grow so a slot never moves once it is handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Front(usize),
    Back(usize),
}

impl Slot {
    fn of_page(page: isize) -> Slot {
        if page >= 0 {
            Slot::Back(page as usize)
        } else {
            Slot::Front((-(page + 1)) as usize)
        }
    }
}

/// An unbounded (in both directions) tape of zero initialised cells.
///
/// Pages are allocated lazily the first time a cursor crosses into them,
/// the origin page (holding index 0) always exists.
#[derive(Debug)]
pub struct Tape {
    /// pages 0, 1, 2, ...
    back: Vec<Box<Page>>,
    /// pages -1, -2, -3, ...
    front: Vec<Box<Page>>,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self {
            back: vec![Box::new([0; PAGE_SIZE])],
            front: vec![],
        }
    }

    /// A cursor positioned on the origin cell
    pub fn cursor(&mut self) -> Cursor<'_> {
        self.cursor_at(0)
    }

    pub fn cursor_at(&mut self, index: isize) -> Cursor<'_> {
        let page = index.div_euclid(PAGE_SIZE as isize);
        let slot = self.ensure_page(page);
        Cursor {
            tape: self,
            index,
            page,
            slot,
        }
    }

    /// Reads a cell without allocating, cells on pages never visited are zero
    pub fn get(&self, index: isize) -> u8 {
        let within = index.rem_euclid(PAGE_SIZE as isize) as usize;
        let page = match Slot::of_page(index.div_euclid(PAGE_SIZE as isize)) {
            Slot::Back(n) => self.back.get(n),
            Slot::Front(n) => self.front.get(n),
        };
        page.map_or(0, |page| page[within])
    }

    pub fn allocated_pages(&self) -> usize {
        self.front.len() + self.back.len()
    }

    /// Makes sure `page` (and every page between it and the origin) exists
    fn ensure_page(&mut self, page: isize) -> Slot {
        let slot = Slot::of_page(page);
        let (pages, n) = match slot {
            Slot::Back(n) => (&mut self.back, n),
            Slot::Front(n) => (&mut self.front, n),
        };
        while pages.len() <= n {
            pages.push(Box::new([0; PAGE_SIZE]));
        }
        slot
    }

    fn page_mut(&mut self, slot: Slot) -> &mut Page {
        match slot {
            Slot::Back(n) => &mut self.back[n],
            Slot::Front(n) => &mut self.front[n],
        }
    }

    fn page(&self, slot: Slot) -> &Page {
        match slot {
            Slot::Back(n) => &self.back[n],
            Slot::Front(n) => &self.front[n],
        }
    }
}

/// The read/write head of a [`Tape`].
///
/// Keeps the slot of the page it is on so reads and writes are a direct index,
/// the slot is only recomputed when an `advance` crosses a page boundary.
#[derive(Debug)]
pub struct Cursor<'t> {
    tape: &'t mut Tape,
    index: isize,
    page: isize,
    slot: Slot,
}

impl<'t> Cursor<'t> {
    /// Absolute position on the tape, 0 is where the program started
    pub fn index(&self) -> isize {
        self.index
    }

    #[inline]
    fn within(&self) -> usize {
        (self.index - self.page * PAGE_SIZE as isize) as usize
    }

    #[inline]
    pub fn read(&self) -> u8 {
        self.tape.page(self.slot)[self.within()]
    }

    #[inline]
    pub fn write(&mut self, value: u8) {
        let within = self.within();
        self.tape.page_mut(self.slot)[within] = value;
    }

    #[inline]
    pub fn advance(&mut self, delta: isize) {
        self.index += delta;
        let page = self.index.div_euclid(PAGE_SIZE as isize);
        if page != self.page {
            self.page = page;
            self.slot = self.tape.ensure_page(page);
        }
    }

    /// Adds (mod 256) to the cell `offset` away without moving
    #[inline]
    pub fn add_at(&mut self, offset: isize, value: u8) {
        self.advance(offset);
        let cell = self.read().wrapping_add(value);
        self.write(cell);
        self.advance(-offset);
    }
}
